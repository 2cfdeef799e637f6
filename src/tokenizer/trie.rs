// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The keyword trie that recognizes multi-word keywords incrementally.

#[cfg(not(feature = "std"))]
use alloc::{
    collections::BTreeMap,
    string::{String, ToString},
};
#[cfg(feature = "std")]
use std::collections::BTreeMap;

/// The result of pushing one word into a [`TrieCursor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TrieMatch {
    /// The word does not extend any keyword from the current node.
    NoMatch,
    /// A keyword may continue here but none ends here.
    Partial,
    /// A keyword ends here and a longer one may continue.
    PartialOrFinal,
    /// A keyword ends here and nothing extends it.
    Final,
}

#[derive(Debug, Default)]
struct TrieNode {
    terminal: bool,
    children: BTreeMap<String, TrieNode>,
}

/// A rooted tree keyed on single-word lexemes. Phrases are inserted split on
/// spaces; the walk is stateful and driven word by word by the readers.
#[derive(Debug)]
pub(crate) struct KeywordTrie {
    root: TrieNode,
}

impl KeywordTrie {
    pub fn new(phrases: &[&str]) -> KeywordTrie {
        let mut root = TrieNode::default();
        for phrase in phrases {
            let mut node = &mut root;
            for word in phrase.split(' ') {
                node = node.children.entry(word.to_string()).or_default();
            }
            node.terminal = true;
        }
        KeywordTrie { root }
    }

    /// Starts a fresh walk from the root.
    pub fn cursor(&self) -> TrieCursor<'_> {
        TrieCursor {
            trie: self,
            node: Some(&self.root),
        }
    }
}

/// A stateful walk over a [`KeywordTrie`]. Once a push returns
/// [`TrieMatch::NoMatch`] the cursor is dead until [`TrieCursor::reset`].
pub(crate) struct TrieCursor<'a> {
    trie: &'a KeywordTrie,
    node: Option<&'a TrieNode>,
}

impl<'a> TrieCursor<'a> {
    pub fn reset(&mut self) {
        self.node = Some(&self.trie.root);
    }

    /// Feeds the next word (already lower-cased) to the walk.
    pub fn push(&mut self, word: &str) -> TrieMatch {
        let next = self.node.and_then(|node| node.children.get(word));
        self.node = next;
        match next {
            None => TrieMatch::NoMatch,
            Some(node) => match (node.terminal, node.children.is_empty()) {
                (true, true) => TrieMatch::Final,
                (true, false) => TrieMatch::PartialOrFinal,
                (false, _) => TrieMatch::Partial,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trie() -> KeywordTrie {
        KeywordTrie::new(&["union", "union all", "order by", "is not null", "is"])
    }

    #[test]
    fn single_word_final() {
        let t = trie();
        let mut cursor = t.cursor();
        assert_eq!(cursor.push("order"), TrieMatch::Partial);
        assert_eq!(cursor.push("by"), TrieMatch::Final);
    }

    #[test]
    fn terminal_with_extension_is_partial_or_final() {
        let t = trie();
        let mut cursor = t.cursor();
        assert_eq!(cursor.push("union"), TrieMatch::PartialOrFinal);
        assert_eq!(cursor.push("all"), TrieMatch::Final);
    }

    #[test]
    fn dead_cursor_stays_dead_until_reset() {
        let t = trie();
        let mut cursor = t.cursor();
        assert_eq!(cursor.push("bogus"), TrieMatch::NoMatch);
        assert_eq!(cursor.push("union"), TrieMatch::NoMatch);
        cursor.reset();
        assert_eq!(cursor.push("union"), TrieMatch::PartialOrFinal);
    }

    #[test]
    fn shared_prefixes_branch() {
        let t = trie();
        let mut cursor = t.cursor();
        assert_eq!(cursor.push("is"), TrieMatch::PartialOrFinal);
        assert_eq!(cursor.push("not"), TrieMatch::Partial);
        assert_eq!(cursor.push("null"), TrieMatch::Final);
    }
}
