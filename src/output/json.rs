//
//  stash-client
//  output/json.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! JSON output for `--json`: records are printed as they were decoded from the
//! server, pretty-printed, one document per command.

use serde::Serialize;
use std::io::{self, Write};

/// Writes `value` as pretty JSON to stdout.
pub fn write_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_json_to(&mut handle, value)
}

/// Writes `value` as pretty JSON followed by a newline.
pub fn write_json_to<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::server::Tag;

    #[test]
    fn test_write_json_to_buffer() {
        let tag = Tag {
            id: "refs/tags/v1.0".to_string(),
            display_id: "v1.0".to_string(),
            ..Default::default()
        };

        let mut buffer = Vec::new();
        write_json_to(&mut buffer, &tag).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["displayId"], "v1.0");
    }
}
