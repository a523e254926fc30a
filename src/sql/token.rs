//! The token stream every builder writes into.
//!
//! Builders never format SQL text themselves. They push tokens, and the
//! target [`Dialect`] decides how identifiers, bind parameters and column
//! types are spelled when the stream is rendered.

use super::ddl::ColumnType;
use super::dialect::Dialect;

/// Reserved words. Phrases the builders always emit together, such as
/// `INNER JOIN` or `NOT NULL`, are a single keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Select,
    From,
    As,
    InnerJoin,
    On,
    OrderBy,
    Asc,
    Desc,
    Limit,
    Offset,
    Rows,
    FetchNext,
    RowsOnly,
    Count,
    In,
    CreateTable,
    IfNotExists,
    NotNull,
    PrimaryKey,
    Check,
    ForeignKey,
    References,
    DropTable,
    IfExists,
    InsertInto,
    Values,
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Select => "SELECT",
            Keyword::From => "FROM",
            Keyword::As => "AS",
            Keyword::InnerJoin => "INNER JOIN",
            Keyword::On => "ON",
            Keyword::OrderBy => "ORDER BY",
            Keyword::Asc => "ASC",
            Keyword::Desc => "DESC",
            Keyword::Limit => "LIMIT",
            Keyword::Offset => "OFFSET",
            Keyword::Rows => "ROWS",
            Keyword::FetchNext => "FETCH NEXT",
            Keyword::RowsOnly => "ROWS ONLY",
            Keyword::Count => "COUNT",
            Keyword::In => "IN",
            Keyword::CreateTable => "CREATE TABLE",
            Keyword::IfNotExists => "IF NOT EXISTS",
            Keyword::NotNull => "NOT NULL",
            Keyword::PrimaryKey => "PRIMARY KEY",
            Keyword::Check => "CHECK",
            Keyword::ForeignKey => "FOREIGN KEY",
            Keyword::References => "REFERENCES",
            Keyword::DropTable => "DROP TABLE",
            Keyword::IfExists => "IF EXISTS",
            Keyword::InsertInto => "INSERT INTO",
            Keyword::Values => "VALUES",
        }
    }
}

/// One unit of SQL output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Keyword(Keyword),
    /// Table, column or alias name, quoted per dialect.
    Ident(String),
    /// Integer literal.
    Int(i64),
    /// Row count for LIMIT, OFFSET and FETCH.
    UInt(u64),
    /// Bind parameter at a 1-based position.
    Param(usize),
    /// Column type, named per dialect.
    Type(ColumnType),
    /// Dialect-owned text, such as the spelling of an unbounded LIMIT.
    /// Only `'static` strings fit, so row data can never reach it.
    Verbatim(&'static str),
    Comma,
    Dot,
    Star,
    Equals,
    Open,
    Close,
    Space,
    Newline,
    Indent,
}

impl Token {
    fn render_into(&self, out: &mut String, dialect: Dialect) {
        let syntax = dialect.syntax();
        match self {
            Token::Keyword(kw) => out.push_str(kw.as_str()),
            Token::Ident(name) => out.push_str(&syntax.quote(name)),
            Token::Int(n) => out.push_str(&n.to_string()),
            Token::UInt(n) => out.push_str(&n.to_string()),
            Token::Param(position) => out.push_str(&syntax.param(*position)),
            Token::Type(ty) => out.push_str(syntax.type_name(*ty)),
            Token::Verbatim(text) => out.push_str(text),
            Token::Comma => out.push(','),
            Token::Dot => out.push('.'),
            Token::Star => out.push('*'),
            Token::Equals => out.push('='),
            Token::Open => out.push('('),
            Token::Close => out.push(')'),
            Token::Space => out.push(' '),
            Token::Newline => out.push('\n'),
            Token::Indent => out.push_str("  "),
        }
    }
}

/// An ordered run of tokens, rendered once per dialect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream(Vec<Token>);

impl TokenStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, token: Token) -> &mut Self {
        self.0.push(token);
        self
    }

    pub fn keyword(&mut self, kw: Keyword) -> &mut Self {
        self.push(Token::Keyword(kw))
    }

    pub fn ident(&mut self, name: &str) -> &mut Self {
        self.push(Token::Ident(name.to_string()))
    }

    pub fn space(&mut self) -> &mut Self {
        self.push(Token::Space)
    }

    pub fn newline(&mut self) -> &mut Self {
        self.push(Token::Newline)
    }

    pub fn extend_from(&mut self, other: &TokenStream) -> &mut Self {
        self.0.extend_from_slice(&other.0);
        self
    }

    /// `a, b, c`
    pub fn comma_list<T>(&mut self, items: &[T], mut each: impl FnMut(&mut Self, &T)) -> &mut Self {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.push(Token::Comma).space();
            }
            each(self, item);
        }
        self
    }

    /// `(a, b, c)`
    pub fn paren_list<T>(&mut self, items: &[T], each: impl FnMut(&mut Self, &T)) -> &mut Self {
        self.push(Token::Open);
        self.comma_list(items, each);
        self.push(Token::Close)
    }

    /// One item per indented line, each line but the last ending in a comma.
    pub fn indented_lines<T>(
        &mut self,
        items: &[T],
        mut each: impl FnMut(&mut Self, &T),
    ) -> &mut Self {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.push(Token::Comma);
            }
            self.newline().push(Token::Indent);
            each(self, item);
        }
        self
    }

    pub fn render(&self, dialect: Dialect) -> String {
        let mut out = String::new();
        for token in &self.0 {
            token.render_into(&mut out, dialect);
        }
        out
    }
}
