//! JSON serialization of extracted statements.
//!
//! The JSON object carries `title`, `tables`, `keyValuePairs`,
//! `accountNumber`, `statementNumber` and `statementDate`.

use std::io::{Read, Write};

use crate::error::Result;
use crate::types::ExtractedStatement;

/// An extracted statement in JSON form.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonStatement {
    /// The extracted statement data.
    pub statement: ExtractedStatement,
}

impl JsonStatement {
    /// Load a previously written statement from any source implementing `Read`.
    pub fn from_read<R: Read>(reader: &mut R) -> Result<Self> {
        let statement = serde_json::from_reader(reader)?;
        Ok(JsonStatement { statement })
    }

    /// Write the statement as pretty-printed JSON followed by a newline.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::fs::File;
    /// use statement_extract::json_format::JsonStatement;
    /// use statement_extract::types::ExtractedStatement;
    ///
    /// let json = JsonStatement { statement: ExtractedStatement::default() };
    /// let mut file = File::create("statement.json")?;
    /// json.write_to(&mut file)?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        serde_json::to_writer_pretty(&mut *writer, &self.statement)?;
        writeln!(writer)?;
        Ok(())
    }
}
