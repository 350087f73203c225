use common::words::{is_alphabetic, MIN_WORD_LEN};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueryError {
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Word(String),
    And,
    Or,
}

impl Token {
    pub fn is_operator(&self) -> bool { !matches!(self, Token::Word(_)) }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(w) => f.write_str(w),
            Token::And => f.write_str("and"),
            Token::Or => f.write_str("or"),
        }
    }
}

/// Split a query line into lowercase tokens.
///
/// Any token with a non-letter fails the whole query. Words shorter than
/// [`MIN_WORD_LEN`] are dropped (they are never indexed), except the operator
/// `or`. Adjacent words get an implicit `and` between them.
pub fn tokenize(line: &str) -> Result<Vec<Token>, QueryError> {
    let mut tokens = Vec::new();
    for raw in line.split_whitespace() {
        if !is_alphabetic(raw) {
            return Err(QueryError::InvalidQuery(format!("{raw:?} is not alphabetic")));
        }
        let lower = raw.to_ascii_lowercase();
        let token = match lower.as_str() {
            "and" => Token::And,
            "or" => Token::Or,
            _ if lower.len() < MIN_WORD_LEN => continue,
            _ => Token::Word(lower),
        };
        if !token.is_operator() && matches!(tokens.last(), Some(Token::Word(_))) {
            tokens.push(Token::And);
        }
        tokens.push(token);
    }
    Ok(tokens)
}

/// Reject a token stream that starts or ends with an operator or has two
/// operators in a row.
pub fn validate(tokens: &[Token]) -> Result<(), QueryError> {
    if tokens.first().is_some_and(Token::is_operator) {
        return Err(QueryError::InvalidQuery("starts with an operator".into()));
    }
    if tokens.last().is_some_and(Token::is_operator) {
        return Err(QueryError::InvalidQuery("ends with an operator".into()));
    }
    if tokens.windows(2).any(|w| w[0].is_operator() && w[1].is_operator()) {
        return Err(QueryError::InvalidQuery("adjacent operators".into()));
    }
    Ok(())
}

pub fn parse(line: &str) -> Result<Vec<Token>, QueryError> {
    let tokens = tokenize(line)?;
    validate(&tokens)?;
    Ok(tokens)
}

pub fn render(tokens: &[Token]) -> String {
    tokens.iter().map(Token::to_string).collect::<Vec<_>>().join(" ")
}
