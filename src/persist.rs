//! Line-oriented persistence for map entries: one `<key> <value>` pair
//! per line, in the container's native iteration order.
//!
//! Keys and values round-trip through their `Display`/`FromStr` forms.
//! Whitespace inside a key or value is not escaped, so such entries are
//! out of contract. Durability is the caller's problem; this module only
//! defines the format.

use std::fmt::Display;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use crate::map::Map;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("i/o failure: {0}")]
    Io(#[from] io::Error),
    /// The line does not split into exactly one key and one value.
    #[error("line {line}: expected `<key> <value>`, found {found} fields")]
    Malformed { line: usize, found: usize },
    /// The line has two fields, but one of them fails to parse.
    #[error("line {line}: cannot parse {what}")]
    Unparsable { line: usize, what: &'static str },
}

/// Write every entry of `map` in its native iteration order.
pub fn write_entries<K, V, W>(map: &dyn Map<K, V>, mut out: W) -> Result<(), PersistError>
where
    K: Display,
    V: Display,
    W: Write,
{
    for (key, value) in map.iter() {
        writeln!(out, "{} {}", key, value)?;
    }
    out.flush()?;
    Ok(())
}

/// Write already-ordered pairs: the shape sorted dumps are built from.
pub fn write_pairs<K, V, W>(pairs: &[(K, V)], mut out: W) -> Result<(), PersistError>
where
    K: Display,
    V: Display,
    W: Write,
{
    for (key, value) in pairs {
        writeln!(out, "{} {}", key, value)?;
    }
    out.flush()?;
    Ok(())
}

/// Parse one persisted line. `number` is 1-based and only used for error
/// reporting.
pub(crate) fn parse_line<K, V>(line: &str, number: usize) -> Result<(K, V), PersistError>
where
    K: FromStr,
    V: FromStr,
{
    let mut fields = line.split_whitespace();
    let (Some(key), Some(value), None) = (fields.next(), fields.next(), fields.next()) else {
        let found = line.split_whitespace().count();
        return Err(PersistError::Malformed {
            line: number,
            found,
        });
    };
    let key = key.parse().map_err(|_| PersistError::Unparsable {
        line: number,
        what: "key",
    })?;
    let value = value.parse().map_err(|_| PersistError::Unparsable {
        line: number,
        what: "value",
    })?;
    Ok((key, value))
}

/// Build a fresh container by inserting each parsed line in file order.
/// Later lines overwrite earlier ones on key collision, as `insert` does.
pub fn read_entries<K, V, M, R>(input: R) -> Result<M, PersistError>
where
    K: FromStr,
    V: FromStr,
    M: Map<K, V> + Default,
    R: BufRead,
{
    let mut map = M::default();
    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let (key, value) = parse_line(&line, index + 1)?;
        map.insert(key, value);
    }
    Ok(map)
}

/// Read a container from a file on disk.
pub fn read_path<K, V, M>(path: &Path) -> Result<M, PersistError>
where
    K: FromStr,
    V: FromStr,
    M: Map<K, V> + Default,
{
    read_entries(BufReader::new(File::open(path)?))
}

/// Write a container to a file, either truncating or appending.
pub fn write_path<K, V>(map: &dyn Map<K, V>, path: &Path, append: bool) -> Result<(), PersistError>
where
    K: Display,
    V: Display,
{
    let mut options = OpenOptions::new();
    options.create(true);
    if append {
        options.append(true);
    } else {
        options.write(true).truncate(true);
    }
    let file = options.open(path)?;
    write_entries(map, BufWriter::new(file))
}
