//! Plain-text statement input.
//!
//! The text is whatever a PDF-to-text step produced for the statement; it is
//! read whole and handed to the [`StatementParser`].

use std::io::Read;

use crate::error::Result;
use crate::parser::StatementParser;
use crate::types::ExtractedStatement;

/// A statement extracted from plain text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStatement {
    /// The extracted statement data.
    pub statement: ExtractedStatement,
}

impl TextStatement {
    /// Read statement text from any source implementing `Read` and parse it.
    ///
    /// # Arguments
    ///
    /// * `reader` - A mutable reference to a type implementing `Read`
    /// * `parser` - The parser to run over the text
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::fs::File;
    /// use statement_extract::parser::StatementParser;
    /// use statement_extract::text_format::TextStatement;
    ///
    /// let mut file = File::open("statement.txt")?;
    /// let text = TextStatement::from_read(&mut file, &StatementParser::default())?;
    /// println!("Statement number: {}", text.statement.statement_number);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_read<R: Read>(reader: &mut R, parser: &StatementParser) -> Result<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;

        Ok(TextStatement {
            statement: parser.parse(&content),
        })
    }
}
