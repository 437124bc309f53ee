//! Object references named by DDL and DECLARE statements.
//!
//! Only the statement head is inspected: the object kind, its modifiers and
//! the (optionally qualified) name that follows. Nothing is resolved against
//! a catalog.

use crate::sql::{keyword::StatementType, token::Token, token_kind::TokenKind};

/// Object kind words recognized after `CREATE`, `ALTER` and `DROP`.
const OBJECT_KINDS: [&str; 14] = [
    "TABLE",
    "VIEW",
    "INDEX",
    "PROCEDURE",
    "FUNCTION",
    "TRIGGER",
    "SCHEMA",
    "COLLECTION",
    "SEQUENCE",
    "ALIAS",
    "VARIABLE",
    "TYPE",
    "MASK",
    "PERMISSION",
];

/// Upper bound on modifier words between the verb and the object kind
/// (`OR REPLACE`, `UNIQUE`, `GLOBAL TEMPORARY`, `ENCODED VECTOR`, ...).
const MAX_MODIFIERS: usize = 4;

/// A possibly schema-qualified object name, as written in the source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ObjectName {
    pub schema: Option<String>,
    pub name: Option<String>,
}

/// An object a statement creates, declares, alters or drops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    /// The statement that names the object.
    pub statement_type: StatementType,
    /// Lower-cased object kind: `table`, `procedure`, `variable`, `cursor`, ...
    pub object_type: String,
    /// Modifier words before the object kind, e.g. `OR REPLACE` or `UNIQUE`.
    pub create_type: Option<String>,
    pub object: ObjectName,
}

impl ObjectRef {
    /// True when the referenced object is a schema rather than an object in one.
    pub fn is_schema(&self) -> bool {
        self.object.name.is_none() && self.object.schema.is_some()
    }
}

/// Small forward cursor over the significant tokens of a statement.
struct Cursor<'a> {
    tokens: &'a [&'a Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(tokens: &'a [&'a Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos).copied()
    }

    fn peek_word(&self, word: &str) -> bool {
        self.peek().is_some_and(|t| t.is_word(word))
    }

    fn next(&mut self) -> Option<&'a Token> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    fn eat_word(&mut self, word: &str) -> bool {
        let found = self.peek_word(word);
        if found {
            self.pos += 1;
        }
        found
    }

    /// `IF EXISTS` / `IF NOT EXISTS`.
    fn skip_existence_check(&mut self) {
        if self.eat_word("IF") {
            self.eat_word("NOT");
            self.eat_word("EXISTS");
        }
    }

    fn name_part(&mut self) -> Option<String> {
        let token = self.peek().filter(|t| t.kind.is_name())?;
        self.pos += 1;
        Some(token.value.clone())
    }

    /// `name`, `schema.name` or system-naming `schema/name`.
    fn object_name(&mut self) -> Option<ObjectName> {
        let first = self.name_part()?;
        let qualified = self.peek().is_some_and(|t| {
            t.kind == TokenKind::Dot || (t.kind == TokenKind::Operator && t.value == "/")
        });
        if qualified {
            self.pos += 1;
            if let Some(name) = self.name_part() {
                return Some(ObjectName {
                    schema: Some(first),
                    name: Some(name),
                });
            }
        }
        Some(ObjectName {
            schema: None,
            name: Some(first),
        })
    }

    /// Modifier words followed by an object kind word.
    fn object_kind(&mut self, mut modifiers: Vec<String>) -> Option<(String, Option<String>)> {
        loop {
            let token = self.next()?;
            if !token.kind.is_name() && !token.is_keyword() {
                return None;
            }
            let upper = token.value.to_uppercase();
            if OBJECT_KINDS.contains(&upper.as_str()) {
                let create_type = (!modifiers.is_empty()).then(|| modifiers.join(" "));
                return Some((upper.to_lowercase(), create_type));
            }
            if modifiers.len() >= MAX_MODIFIERS {
                return None;
            }
            modifiers.push(upper);
        }
    }
}

/// Derive the object reference of a statement from the significant tokens
/// that follow its governing keyword. Returns zero or one reference.
pub(crate) fn extract_references(statement_type: StatementType, rest: &[&Token]) -> Vec<ObjectRef> {
    let mut cursor = Cursor::new(rest);
    let found = match statement_type {
        StatementType::Create => {
            let mut modifiers = Vec::new();
            if cursor.peek_word("OR") {
                cursor.next();
                if !cursor.eat_word("REPLACE") {
                    return Vec::new();
                }
                modifiers.push("OR REPLACE".to_string());
            }
            ddl_object(&mut cursor, modifiers)
        }
        StatementType::Alter | StatementType::Drop => ddl_object(&mut cursor, Vec::new()),
        StatementType::Declare => declared_object(&mut cursor),
        _ => None,
    };

    found
        .map(|(object_type, create_type, object)| ObjectRef {
            statement_type,
            object_type,
            create_type,
            object,
        })
        .into_iter()
        .collect()
}

type Found = (String, Option<String>, ObjectName);

fn ddl_object(cursor: &mut Cursor<'_>, modifiers: Vec<String>) -> Option<Found> {
    let (object_type, create_type) = cursor.object_kind(modifiers)?;
    cursor.skip_existence_check();
    let mut object = cursor.object_name()?;

    if matches!(object_type.as_str(), "schema" | "collection") {
        object = ObjectName {
            schema: object.name,
            name: None,
        };
    }
    Some((object_type, create_type, object))
}

fn declared_object(cursor: &mut Cursor<'_>) -> Option<Found> {
    if cursor.peek_word("GLOBAL") {
        return ddl_object(cursor, Vec::new());
    }
    if ["CONTINUE", "EXIT", "UNDO"]
        .iter()
        .any(|w| cursor.peek_word(w))
    {
        return None;
    }

    let name = cursor.name_part()?;
    let object_type = if cursor.peek_word("CONDITION") {
        "condition"
    } else if cursor.tokens[cursor.pos..]
        .iter()
        .take_while(|t| !t.is_word("FOR"))
        .any(|t| t.is_word("CURSOR"))
    {
        "cursor"
    } else {
        "variable"
    };

    Some((
        object_type.to_string(),
        None,
        ObjectName {
            schema: None,
            name: Some(name),
        },
    ))
}
