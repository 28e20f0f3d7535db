//! Path queries against JSON documents.
//!
//! Paths follow the dotted syntax popularised by gjson:
//!
//! - `a.b.c` walks object keys, `\` escapes the next character (`a\.b`)
//! - `items.0` indexes into an array
//! - `na*e` / `n?me` match the first object key fitting the pattern
//! - `items.#` is the length of an array, `items.#.name` maps over it
//! - `items.#(label=="json")` is the first element matching a condition,
//!   `items.#(age>30)#` is every matching element
//!
//! Queries walk the document text itself, so a resolved node is the exact
//! slice of JSON it was found as. When an object repeats a key, the first
//! occurrence wins. A path that does not resolve is `None`, never an error.

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::value::RawValue;
use serde_json::Value;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

/// A node selected by a path query, held as JSON text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved(String);

impl Resolved {
    /// Renders the node as plain text: strings unquoted and unescaped,
    /// `null` as nothing, everything else as its JSON text.
    pub fn as_scalar_string(&self) -> String {
        match Kind::of(&self.0) {
            Kind::String => {
                serde_json::from_str::<String>(&self.0).unwrap_or_else(|_| self.0.clone())
            }
            Kind::Null => String::new(),
            _ => self.0.clone(),
        }
    }

    /// The JSON text of the node exactly as it appears in the document.
    pub fn as_raw_json(&self) -> &str {
        &self.0
    }

    /// Parses the node into a `serde_json::Value`.
    pub fn to_value(&self) -> Option<Value> {
        serde_json::from_str(&self.0).ok()
    }
}

/// Resolves `path` against the JSON text `document`.
pub fn query(document: &str, path: &str) -> Option<Resolved> {
    Path::parse(path)?.resolve(document)
}

/// A parsed path expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    components: Vec<Component>,
}

#[derive(Debug, Clone, PartialEq)]
enum Component {
    /// Object key or array index.
    Key(String),
    /// Object key containing unescaped `*` or `?`; escapes are kept for `like`.
    Pattern(String),
    /// `#`
    Count,
    /// `#(...)` or `#(...)#`
    Query { condition: Condition, all: bool },
}

#[derive(Debug, Clone, PartialEq)]
struct Condition {
    field: Path,
    test: Option<(Operator, Literal)>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Operator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Like,
    NotLike,
}

#[derive(Debug, Clone, PartialEq)]
enum Literal {
    Str(String),
    Num(f64),
    Bool(bool),
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Kind {
    Object,
    Array,
    String,
    Bool,
    Null,
    Number,
}

impl Kind {
    fn of(json: &str) -> Self {
        match json.trim_start().as_bytes().first() {
            Some(b'{') => Kind::Object,
            Some(b'[') => Kind::Array,
            Some(b'"') => Kind::String,
            Some(b't') | Some(b'f') => Kind::Bool,
            Some(b'n') => Kind::Null,
            _ => Kind::Number,
        }
    }
}

/// Object members in document order, duplicates included.
struct Members<'a>(Vec<(String, &'a RawValue)>);

impl<'a> Deserialize<'a> for Members<'a> {
    fn deserialize<D: Deserializer<'a>>(deserializer: D) -> Result<Self, D::Error> {
        struct MembersVisitor;

        impl<'a> Visitor<'a> for MembersVisitor {
            type Value = Members<'a>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'a>>(self, mut map: A) -> Result<Members<'a>, A::Error> {
                let mut members = Vec::new();
                while let Some((key, value)) = map.next_entry::<String, &'a RawValue>()? {
                    members.push((key, value));
                }
                Ok(Members(members))
            }
        }

        deserializer.deserialize_map(MembersVisitor)
    }
}

fn members(node: &str) -> Option<Vec<(String, &str)>> {
    if Kind::of(node) != Kind::Object {
        return None;
    }
    let Members(members) = serde_json::from_str(node).ok()?;
    Some(members.into_iter().map(|(key, value)| (key, value.get())).collect())
}

fn elements(node: &str) -> Option<Vec<&str>> {
    if Kind::of(node) != Kind::Array {
        return None;
    }
    let items: Vec<&RawValue> = serde_json::from_str(node).ok()?;
    Some(items.into_iter().map(RawValue::get).collect())
}

impl Path {
    /// Parses a path expression. Returns `None` for an empty path or an
    /// unterminated `#(` query.
    pub fn parse(path: &str) -> Option<Self> {
        if path.is_empty() {
            return None;
        }
        Self::parse_components(path)
    }

    fn parse_components(path: &str) -> Option<Self> {
        let chars: Vec<char> = path.chars().collect();
        let mut components = Vec::new();
        let mut i = 0;

        loop {
            if chars.get(i) == Some(&'#') && chars.get(i + 1) == Some(&'(') {
                let close = matching_paren(&chars, i + 1)?;
                let inner: String = chars[i + 2..close].iter().collect();
                let condition = Condition::parse(&inner)?;
                i = close + 1;
                let all = chars.get(i) == Some(&'#');
                if all {
                    i += 1;
                }
                components.push(Component::Query { condition, all });
                match chars.get(i) {
                    None => break,
                    Some('.') => i += 1,
                    Some(_) => return None,
                }
                continue;
            }

            let mut key = String::new();
            let mut pattern = String::new();
            let mut wildcard = false;
            while let Some(&c) = chars.get(i) {
                match c {
                    '\\' => {
                        if let Some(&next) = chars.get(i + 1) {
                            key.push(next);
                            pattern.push('\\');
                            pattern.push(next);
                            i += 2;
                        } else {
                            i += 1;
                        }
                    }
                    '.' => break,
                    '*' | '?' => {
                        wildcard = true;
                        key.push(c);
                        pattern.push(c);
                        i += 1;
                    }
                    _ => {
                        key.push(c);
                        pattern.push(c);
                        i += 1;
                    }
                }
            }

            components.push(if wildcard {
                Component::Pattern(pattern)
            } else if pattern == "#" {
                Component::Count
            } else {
                Component::Key(key)
            });

            match chars.get(i) {
                None => break,
                _ => i += 1,
            }
        }

        Some(Self { components })
    }

    /// Walks the JSON text `document` along this path.
    pub fn resolve(&self, document: &str) -> Option<Resolved> {
        eval(document.trim(), &self.components).map(|node| Resolved(node.into_owned()))
    }
}

/// Walks `node` along `components`. Borrowed results are slices of the
/// document; results built from several elements are owned.
fn eval<'a>(node: &'a str, components: &[Component]) -> Option<Cow<'a, str>> {
    let Some((head, rest)) = components.split_first() else {
        return Some(Cow::Borrowed(node));
    };

    match head {
        Component::Key(key) => {
            let child = match Kind::of(node) {
                Kind::Object => members(node)?
                    .into_iter()
                    .find(|(name, _)| name == key)
                    .map(|(_, value)| value)?,
                Kind::Array => *elements(node)?.get(key.parse::<usize>().ok()?)?,
                _ => return None,
            };
            eval(child, rest)
        }
        Component::Pattern(pattern) => {
            let (_, child) = members(node)?
                .into_iter()
                .find(|(name, _)| like(name, pattern))?;
            eval(child, rest)
        }
        Component::Count => {
            let items = elements(node)?;
            if rest.is_empty() {
                return Some(Cow::Owned(items.len().to_string()));
            }
            let mapped: Vec<Cow<str>> = items.into_iter().filter_map(|item| eval(item, rest)).collect();
            Some(Cow::Owned(format!("[{}]", mapped.join(","))))
        }
        Component::Query { condition, all } => {
            let items = elements(node)?;
            if *all {
                let matched: Vec<Cow<str>> = items
                    .into_iter()
                    .filter(|item| condition.matches(item))
                    .filter_map(|item| eval(item, rest))
                    .collect();
                Some(Cow::Owned(format!("[{}]", matched.join(","))))
            } else {
                let first = items.into_iter().find(|item| condition.matches(item))?;
                eval(first, rest)
            }
        }
    }
}

/// Index of the `)` closing the `(` at `open`, skipping quoted strings.
fn matching_paren(chars: &[char], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut i = open;
    while let Some(&c) = chars.get(i) {
        if in_string {
            match c {
                '\\' => i += 1,
                '"' => in_string = false,
                _ => {}
            }
        } else {
            match c {
                '"' => in_string = true,
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
        }
        i += 1;
    }
    None
}

impl Condition {
    fn parse(inner: &str) -> Option<Self> {
        let Some((at, operator, len)) = find_operator(inner) else {
            return Some(Self {
                field: Path::parse_components(inner.trim())?,
                test: None,
            });
        };
        let field = inner[..at].trim();
        let literal = Literal::parse(inner[at + len..].trim());
        Some(Self {
            field: if field.is_empty() {
                Path { components: Vec::new() }
            } else {
                Path::parse_components(field)?
            },
            test: Some((operator, literal)),
        })
    }

    fn matches(&self, item: &str) -> bool {
        let Some(target) = eval(item, &self.field.components) else {
            return false;
        };
        match &self.test {
            None => true,
            Some((operator, literal)) => compare(&target, *operator, literal),
        }
    }
}

/// Byte offset, operator and operator length of the first comparison
/// operator outside a quoted string and outside nested `#(...)` queries.
fn find_operator(inner: &str) -> Option<(usize, Operator, usize)> {
    let bytes = inner.as_bytes();
    let mut in_string = false;
    let mut depth = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        if in_string {
            match c {
                b'\\' => i += 1,
                b'"' => in_string = false,
                _ => {}
            }
            i += 1;
            continue;
        }
        let next = bytes.get(i + 1).copied();
        let found = match (c, next) {
            (b'"', _) => {
                in_string = true;
                None
            }
            (b'(', _) => {
                depth += 1;
                None
            }
            (b')', _) => {
                depth = depth.saturating_sub(1);
                None
            }
            _ if depth > 0 => None,
            (b'=', Some(b'=')) => Some((Operator::Eq, 2)),
            (b'=', _) => Some((Operator::Eq, 1)),
            (b'!', Some(b'=')) => Some((Operator::Ne, 2)),
            (b'!', Some(b'%')) => Some((Operator::NotLike, 2)),
            (b'<', Some(b'=')) => Some((Operator::Le, 2)),
            (b'<', _) => Some((Operator::Lt, 1)),
            (b'>', Some(b'=')) => Some((Operator::Ge, 2)),
            (b'>', _) => Some((Operator::Gt, 1)),
            (b'%', _) => Some((Operator::Like, 1)),
            _ => None,
        };
        if let Some((operator, len)) = found {
            return Some((i, operator, len));
        }
        i += 1;
    }
    None
}

impl Literal {
    fn parse(text: &str) -> Self {
        if text.starts_with('"') {
            return match serde_json::from_str::<String>(text) {
                Ok(s) => Literal::Str(s),
                Err(_) => Literal::Str(text.trim_matches('"').to_string()),
            };
        }
        match text {
            "true" => Literal::Bool(true),
            "false" => Literal::Bool(false),
            "null" => Literal::Null,
            _ => match text.parse::<f64>() {
                Ok(n) => Literal::Num(n),
                Err(_) => Literal::Str(text.to_string()),
            },
        }
    }
}

fn compare(target: &str, operator: Operator, literal: &Literal) -> bool {
    match (Kind::of(target), literal) {
        (Kind::String, Literal::Str(l)) => {
            let Ok(s) = serde_json::from_str::<String>(target) else {
                return false;
            };
            match operator {
                Operator::Like => like(&s, l),
                Operator::NotLike => !like(&s, l),
                _ => ordering_holds(s.as_str().cmp(l.as_str()), operator),
            }
        }
        (Kind::Number, Literal::Num(l)) => {
            match target.trim().parse::<f64>().ok().and_then(|n| n.partial_cmp(l)) {
                Some(ordering) => ordering_holds(ordering, operator),
                None => false,
            }
        }
        (Kind::Bool, Literal::Bool(l)) => {
            let b = target.trim() == "true";
            match operator {
                Operator::Eq => b == *l,
                Operator::Ne => b != *l,
                _ => false,
            }
        }
        (Kind::Null, Literal::Null) => operator == Operator::Eq,
        _ => false,
    }
}

fn ordering_holds(ordering: Ordering, operator: Operator) -> bool {
    match operator {
        Operator::Eq => ordering == Ordering::Equal,
        Operator::Ne => ordering != Ordering::Equal,
        Operator::Lt => ordering == Ordering::Less,
        Operator::Le => ordering != Ordering::Greater,
        Operator::Gt => ordering == Ordering::Greater,
        Operator::Ge => ordering != Ordering::Less,
        Operator::Like | Operator::NotLike => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    AnyRun,
    AnyOne,
    Char(char),
}

/// Wildcard match: `*` is any run of characters, `?` exactly one, `\`
/// escapes the next character.
fn like(text: &str, pattern: &str) -> bool {
    let text: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        tokens.push(match c {
            '*' => Token::AnyRun,
            '?' => Token::AnyOne,
            '\\' => Token::Char(chars.next().unwrap_or('\\')),
            c => Token::Char(c),
        });
    }

    let (mut t, mut p) = (0, 0);
    // last `*` seen and the text position it currently absorbs up to
    let mut backtrack: Option<(usize, usize)> = None;
    while t < text.len() {
        match tokens.get(p) {
            Some(Token::AnyRun) => {
                backtrack = Some((p, t));
                p += 1;
                continue;
            }
            Some(Token::AnyOne) => {
                t += 1;
                p += 1;
                continue;
            }
            Some(Token::Char(c)) if *c == text[t] => {
                t += 1;
                p += 1;
                continue;
            }
            _ => {}
        }
        match backtrack {
            Some((star, absorbed)) => {
                p = star + 1;
                t = absorbed + 1;
                backtrack = Some((star, absorbed + 1));
            }
            None => return false,
        }
    }
    tokens[p..].iter().all(|token| *token == Token::AnyRun)
}
