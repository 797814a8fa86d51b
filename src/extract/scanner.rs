use sqlparser::dialect::MySqlDialect;
use sqlparser::tokenizer::{Token, Tokenizer};
use tracing::warn;

/// One value of a `VALUES` tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Null,
    Number(String),
    Text(String),
    /// Any other literal or keyword, kept as written.
    Other(String),
}

impl SqlValue {
    /// Text form with quotes removed. `NULL` reads as an empty string.
    pub fn as_text(&self) -> &str {
        match self {
            SqlValue::Null => "",
            SqlValue::Number(value) | SqlValue::Text(value) | SqlValue::Other(value) => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertStatement {
    pub table: String,
    pub rows: Vec<Vec<SqlValue>>,
}

/// Finds every `INSERT ... INTO <table> ... VALUES (...), (...);` for `table`.
///
/// The dump is tokenized one chunk at a time, a chunk starting at each line
/// that opens an INSERT. A chunk that cannot be tokenized is dropped with a
/// warning. A statement that stops making sense halfway is dropped up to its
/// `;` with a warning, rows already read from it included.
pub fn scan_inserts(sql: &str, table: &str) -> Vec<InsertStatement> {
    let dialect = MySqlDialect {};
    let mut out = Vec::new();

    for (line, chunk) in statement_chunks(sql) {
        let tokens = match Tokenizer::new(&dialect, chunk).tokenize() {
            Ok(tokens) => tokens.into_iter()
                .filter(|token| !matches!(token, Token::Whitespace(_)))
                .collect::<Vec<_>>(),
            Err(error) => {
                warn!(table, line, "skipping statement that cannot be tokenized: {error}");
                continue;
            }
        };

        let mut scanner = Scanner {
            tokens: &tokens,
            index: 0,
        };
        scanner.scan(table, &mut out);
    }

    out
}

/// Splits `sql` before every line starting with `INSERT`. Each chunk comes
/// with the 1-based line it starts on.
fn statement_chunks(sql: &str) -> Vec<(usize, &str)> {
    let mut starts = vec![(1, 0)];
    let mut offset = 0;
    for (index, line) in sql.split_inclusive('\n').enumerate() {
        if index > 0 && starts_insert(line) {
            starts.push((index + 1, offset));
        }
        offset += line.len();
    }

    starts.iter()
        .enumerate()
        .map(|(i, &(line, start))| {
            let end = starts.get(i + 1).map_or(sql.len(), |&(_, end)| end);
            (line, &sql[start..end])
        })
        .collect()
}

fn starts_insert(line: &str) -> bool {
    let line = line.trim_start();
    line.get(..6).is_some_and(|word| word.eq_ignore_ascii_case("INSERT"))
        && line[6..].starts_with(|c: char| c.is_whitespace())
}

fn is_word(token: &Token, word: &str) -> bool {
    match token {
        Token::Word(w) => w.quote_style.is_none() && w.value.eq_ignore_ascii_case(word),
        _ => false,
    }
}

fn is_string(token: &Token) -> bool {
    matches!(
        token,
        Token::SingleQuotedString(_)
            | Token::DoubleQuotedString(_)
            | Token::NationalStringLiteral(_)
            | Token::EscapedStringLiteral(_)
    )
}

struct Scanner<'t> {
    tokens: &'t [Token],
    index: usize,
}

impl<'t> Scanner<'t> {
    fn scan(&mut self, table: &str, out: &mut Vec<InsertStatement>) {
        while let Some(token) = self.next() {
            if !is_word(token, "INSERT") {
                continue;
            }

            match self.parse_insert(table) {
                Ok(Some(statement)) => out.push(statement),
                Ok(None) => self.skip_statement(),
                Err(message) => {
                    warn!(table, "skipping malformed INSERT statement: {message}");
                    self.skip_statement();
                }
            }
        }
    }

    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.index)
            .filter(|token| !matches!(token, Token::EOF))
    }

    fn next(&mut self) -> Option<&'t Token> {
        let token = self.peek()?;
        self.index += 1;
        Some(token)
    }

    fn take(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    fn take_word(&mut self, word: &str) -> bool {
        match self.peek() {
            Some(token) if is_word(token, word) => {
                self.index += 1;
                true
            }
            _ => false,
        }
    }

    fn expect(&mut self, expected: &Token) -> Result<(), String> {
        if self.take(expected) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("expected {expected}")))
        }
    }

    fn unexpected(&self, message: &str) -> String {
        match self.peek() {
            Some(token) => format!("{message}, found {token}"),
            None => format!("{message}, found end of input"),
        }
    }

    fn skip_statement(&mut self) {
        while let Some(token) = self.next() {
            if *token == Token::SemiColon {
                break;
            }
        }
    }

    /// Parses the rest of an INSERT after its keyword. `Ok(None)` means the
    /// statement targets another table.
    fn parse_insert(&mut self, table: &str) -> Result<Option<InsertStatement>, String> {
        for modifier in ["LOW_PRIORITY", "DELAYED", "HIGH_PRIORITY", "IGNORE"] {
            self.take_word(modifier);
        }
        if !self.take_word("INTO") {
            return Err(self.unexpected("expected INTO"));
        }

        let name = self.parse_table_name()?;
        if name != table {
            return Ok(None);
        }

        // column list, positions are what matters
        if self.take(&Token::LParen) {
            self.skip_parenthesized()?;
        }

        if !(self.take_word("VALUES") || self.take_word("VALUE")) {
            return Err(self.unexpected("expected VALUES"));
        }

        let mut rows = Vec::new();
        loop {
            self.expect(&Token::LParen)?;
            rows.push(self.parse_tuple()?);
            if !self.take(&Token::Comma) {
                break;
            }
        }

        // `ON DUPLICATE KEY UPDATE ...` and friends
        if self.peek().is_some() && !self.take(&Token::SemiColon) {
            self.skip_statement();
        }

        Ok(Some(InsertStatement {
            table: name,
            rows,
        }))
    }

    /// Last segment of a possibly qualified name, `db`.`wp_posts` gives `wp_posts`.
    fn parse_table_name(&mut self) -> Result<String, String> {
        let mut name = match self.peek() {
            Some(Token::Word(word)) => word.value.clone(),
            _ => return Err(self.unexpected("expected table name")),
        };
        self.index += 1;

        while self.take(&Token::Period) {
            match self.next() {
                Some(Token::Word(word)) => name = word.value.clone(),
                _ => return Err("expected identifier after '.'".to_owned()),
            }
        }
        Ok(name)
    }

    fn skip_parenthesized(&mut self) -> Result<(), String> {
        let mut depth = 1usize;
        while depth > 0 {
            match self.next() {
                Some(Token::LParen) => depth += 1,
                Some(Token::RParen) => depth -= 1,
                Some(_) => {}
                None => return Err("unterminated column list".to_owned()),
            }
        }
        Ok(())
    }

    /// Reads values up to and including the closing parenthesis.
    fn parse_tuple(&mut self) -> Result<Vec<SqlValue>, String> {
        let mut values = Vec::new();
        if self.take(&Token::RParen) {
            return Ok(values);
        }

        loop {
            values.push(self.parse_value()?);
            if self.take(&Token::Comma) {
                continue;
            }
            self.expect(&Token::RParen)?;
            return Ok(values);
        }
    }

    fn parse_value(&mut self) -> Result<SqlValue, String> {
        let Some(token) = self.peek() else {
            return Err(self.unexpected("expected value"));
        };

        let value = match token {
            Token::Number(number, _) => SqlValue::Number(number.clone()),
            Token::Minus | Token::Plus => {
                let sign = if *token == Token::Minus { "-" } else { "" };
                self.index += 1;
                match self.peek() {
                    Some(Token::Number(number, _)) => SqlValue::Number(format!("{sign}{number}")),
                    _ => return Err(self.unexpected("expected number after sign")),
                }
            }
            Token::SingleQuotedString(value)
            | Token::DoubleQuotedString(value)
            | Token::NationalStringLiteral(value)
            | Token::EscapedStringLiteral(value) => SqlValue::Text(value.clone()),
            Token::Word(word) if word.quote_style.is_none() && word.value.eq_ignore_ascii_case("NULL") => {
                SqlValue::Null
            }
            // charset introducer, _binary 'abc' or _utf8mb4 'abc'
            Token::Word(word) if word.value.starts_with('_')
                && self.tokens.get(self.index + 1).is_some_and(is_string) =>
            {
                self.index += 1;
                return self.parse_value();
            }
            Token::Word(word) => SqlValue::Other(word.value.clone()),
            Token::Comma | Token::LParen | Token::RParen | Token::SemiColon => {
                return Err(self.unexpected("expected value"));
            }
            token => SqlValue::Other(token.to_string()),
        };
        self.index += 1;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(value: &str) -> SqlValue {
        SqlValue::Text(value.to_owned())
    }

    fn number(value: &str) -> SqlValue {
        SqlValue::Number(value.to_owned())
    }

    #[test]
    fn reads_tuples_of_matching_table() {
        let sql = "INSERT INTO `wp_posts` (`ID`, `post_title`) VALUES (1,'a, (b)'),\n(2,'it\\'s');";
        let statements = scan_inserts(sql, "wp_posts");
        assert_eq!(statements, vec![InsertStatement {
            table: "wp_posts".to_owned(),
            rows: vec![
                vec![number("1"), text("a, (b)")],
                vec![number("2"), text("it's")],
            ],
        }]);
    }

    #[test]
    fn ignores_other_tables_and_statements() {
        let sql = r#"
            -- dump header
            /*!40101 SET NAMES utf8mb4 */;
            CREATE TABLE `wp_users` (`ID` bigint(20) unsigned NOT NULL);
            INSERT INTO `wp_users` VALUES (1,'admin');
            LOCK TABLES `wp_posts` WRITE;
            INSERT IGNORE INTO `shop`.`wp_posts` VALUES (7,NULL,-3,_binary 'x');
            UNLOCK TABLES;
        "#;
        let statements = scan_inserts(sql, "wp_posts");
        assert_eq!(statements.len(), 1);
        assert_eq!(statements[0].rows, vec![vec![
            number("7"),
            SqlValue::Null,
            number("-3"),
            text("x"),
        ]]);
        assert_eq!(statements[0].rows[0][1].as_text(), "");
    }

    #[test]
    fn malformed_statement_does_not_stop_the_scan() {
        let sql = "INSERT INTO wp_posts VALUES (1,2;\nINSERT INTO wp_posts VALUES (3,4);";
        let statements = scan_inserts(sql, "wp_posts");
        assert_eq!(statements.len(), 1);
        assert_eq!(statements[0].rows, vec![vec![number("3"), number("4")]]);
    }

    #[test]
    fn trailing_clauses_are_skipped() {
        let sql = "INSERT INTO wp_posts VALUES (1) ON DUPLICATE KEY UPDATE ID = 1; INSERT INTO wp_posts VALUES (2);";
        let statements = scan_inserts(sql, "wp_posts");
        let ids = statements.iter()
            .flat_map(|statement| statement.rows.iter())
            .map(|row| row[0].as_text())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn unreadable_statement_only_loses_itself() {
        let sql = concat!(
            "INSERT INTO `wp_posts` VALUES (1,'a');\n",
            "INSERT INTO `wp_comments` VALUES (1,'oops);\n",
            "INSERT INTO `wp_posts` VALUES (2,'b');\n",
            "INSERT INTO `wp_posts` VALUES (3,'trunc",
        );
        let statements = scan_inserts(sql, "wp_posts");
        let ids = statements.iter()
            .flat_map(|statement| statement.rows.iter())
            .map(|row| row[0].as_text())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn chunks_start_at_insert_lines() {
        let sql = "LOCK TABLES `wp_posts` WRITE;\n  insert INTO a VALUES (1);\nINSERTED\nINSERT INTO b VALUES (2);";
        let chunks = statement_chunks(sql);
        assert_eq!(chunks, vec![
            (1, "LOCK TABLES `wp_posts` WRITE;\n"),
            (2, "  insert INTO a VALUES (1);\nINSERTED\n"),
            (4, "INSERT INTO b VALUES (2);"),
        ]);
        assert_eq!(chunks.iter().map(|(_, chunk)| *chunk).collect::<String>(), sql);
    }
}
