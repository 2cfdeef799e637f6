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

#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Expr;

/// A literal value, such as a string, number, boolean or NULL.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LiteralValue {
    /// A numeric literal, kept as written; the parser does not interpret
    /// numbers.
    Number(String),
    /// A single-quoted string with quotes stripped and doubling unescaped.
    /// `specifier` carries the prefix letter of `E'...'`, `B'...'`,
    /// `X'...'` and `N'...'` strings.
    String {
        value: String,
        specifier: Option<char>,
    },
    /// `TRUE` or `FALSE`
    Boolean(bool),
    /// `NULL`
    Null,
}

impl LiteralValue {
    /// Create a plain string literal with no specifier.
    pub fn string<S>(value: S) -> Self
    where
        S: Into<String>,
    {
        LiteralValue::String {
            value: value.into(),
            specifier: None,
        }
    }
}

/// A SQL type, as used in casts and typed literals.
///
/// Kept open rather than as a closed enum: `numeric(10, 2)`,
/// `timestamp with time zone` and user-defined type names all flow through
/// the same shape. `name` is the canonical lower-cased spelling, with `[]`
/// appended for array types.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TypeValue {
    pub name: String,
    /// Arguments of parameterized types like `varchar(45)`; empty when the
    /// type takes none.
    pub args: Vec<Expr>,
}

impl TypeValue {
    pub fn new<S>(name: S) -> Self
    where
        S: Into<String>,
    {
        TypeValue {
            name: name.into(),
            args: Vec::new(),
        }
    }
}

/// A placeholder parameter: `:name`, `$1`, `?` or `@tag`. The text keeps
/// the sigil.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParameterExpression {
    pub text: String,
}

impl ParameterExpression {
    pub fn new<S>(text: S) -> Self
    where
        S: Into<String>,
    {
        ParameterExpression { text: text.into() }
    }
}
