/**
 * Read expected version strings straight from a resource script (`.rc`).
 *
 * Only `VALUE "Key", "Value"` statements in the first string table under `BLOCK "StringFileInfo"` are used.
 * That is the same table the checker reads from the compiled binary.
 *
 * Keywords are case insensitive and statements may span lines, as with the resource compiler
 */
use super::error::ExpectedError;
use crate::structs::version::VersionStrings;
use log::{debug, error, warn};
use nom::{
    bytes::complete::{tag, tag_no_case, take_while1},
    character::complete::{char, multispace0},
    error::ErrorKind,
};

const STRING_FILE_INFO_KEY: &str = "StringFileInfo";

#[derive(Debug, Default)]
struct ScriptState {
    depth: usize,
    /// Name of the last `BLOCK` statement waiting for its `BEGIN`
    pending_block: Option<String>,
    string_file_info_depth: Option<usize>,
    table_depth: Option<usize>,
    tables_seen: usize,
}

/// Parse resource script text and return the first string table
pub(crate) fn parse_resource_script(script: &str) -> Result<VersionStrings, ExpectedError> {
    let text = strip_comments(script);
    let mut state = ScriptState::default();
    let mut strings = VersionStrings::new();
    let mut input = text.trim_start();

    while !input.is_empty() {
        let line = line_number(&text, input);

        if keyword(input, "BLOCK").is_ok() {
            let (remaining, name) = match block_statement(input) {
                Ok(result) => result,
                Err(err) => {
                    error!("[expected] Bad BLOCK statement on line {line}: {err:?}");
                    return Err(ExpectedError::BadResourceScript);
                }
            };
            state.pending_block = Some(name);
            input = remaining.trim_start();
            continue;
        }

        if let Ok((after_keyword, _)) = keyword(input, "VALUE") {
            input = match value_statement(input) {
                Ok((remaining, (key, value))) => {
                    if state.in_first_table() {
                        debug!("[expected] Line {line} expects {key:?}");
                        strings.insert(&key, &value);
                    }
                    remaining
                }
                Err(err) => {
                    if state.in_first_table() {
                        warn!("[expected] Skipping non-string VALUE on line {line}: {err:?}");
                    }
                    // Remaining arguments are skipped as plain tokens
                    after_keyword
                }
            };
            input = input.trim_start();
            continue;
        }

        if let Ok((remaining, _)) = block_begin(input) {
            state.open_block();
            input = remaining.trim_start();
            continue;
        }

        if let Ok((remaining, _)) = block_end(input) {
            if state.depth == 0 {
                error!("[expected] Unexpected END on line {line}");
                return Err(ExpectedError::BadResourceScript);
            }
            state.close_block();
            input = remaining.trim_start();
            continue;
        }

        input = match skip_token(input) {
            Ok((remaining, _)) => remaining.trim_start(),
            Err(err) => {
                error!("[expected] Bad token on line {line}: {err:?}");
                return Err(ExpectedError::BadResourceScript);
            }
        };
    }

    if state.depth != 0 {
        error!("[expected] Resource script has unbalanced BEGIN/END");
        return Err(ExpectedError::BadResourceScript);
    }
    if strings.is_empty() {
        error!("[expected] Resource script has no StringFileInfo strings");
        return Err(ExpectedError::NoStrings);
    }
    Ok(strings)
}

impl ScriptState {
    fn open_block(&mut self) {
        self.depth += 1;
        let block = self.pending_block.take();

        if let Some(name) = block {
            if name == STRING_FILE_INFO_KEY && self.string_file_info_depth.is_none() {
                self.string_file_info_depth = Some(self.depth);
            } else if self.string_file_info_depth == Some(self.depth - 1) {
                if self.tables_seen == 0 {
                    self.table_depth = Some(self.depth);
                }
                self.tables_seen += 1;
            }
        }
    }

    fn close_block(&mut self) {
        if self.table_depth == Some(self.depth) {
            self.table_depth = None;
        }
        if self.string_file_info_depth == Some(self.depth) {
            self.string_file_info_depth = None;
        }
        self.depth = self.depth.saturating_sub(1);
    }

    fn in_first_table(&self) -> bool {
        self.table_depth == Some(self.depth)
    }
}

/// Line of `remaining` within `text`. `remaining` must be a suffix of `text`
fn line_number(text: &str, remaining: &str) -> usize {
    let offset = text.len() - remaining.len();
    text[..offset].matches('\n').count() + 1
}

/// Remove `//` and `/* */` comments that are not inside a string. Line breaks are kept
fn strip_comments(script: &str) -> String {
    let mut stripped = String::with_capacity(script.len());
    let mut in_string = false;
    let mut chars = script.chars().peekable();

    while let Some(character) = chars.next() {
        if in_string {
            stripped.push(character);
            if character == '\\' {
                if let Some(escaped) = chars.next() {
                    stripped.push(escaped);
                }
            } else if character == '"' || character == '\n' {
                in_string = false;
            }
            continue;
        }

        match (character, chars.peek().copied()) {
            ('/', Some('/')) => {
                for comment in chars.by_ref() {
                    if comment == '\n' {
                        stripped.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut previous = ' ';
                for comment in chars.by_ref() {
                    if previous == '*' && comment == '/' {
                        break;
                    }
                    if comment == '\n' {
                        stripped.push('\n');
                    }
                    previous = comment;
                }
                stripped.push(' ');
            }
            _ => {
                if character == '"' {
                    in_string = true;
                }
                stripped.push(character);
            }
        }
    }
    stripped
}

fn is_word_char(character: char) -> bool {
    character.is_alphanumeric() || character == '_'
}

fn is_token_char(character: char) -> bool {
    !character.is_whitespace() && !matches!(character, '"' | ',' | '{' | '}')
}

/// Match a whole keyword, ignoring case
fn keyword<'a>(input: &'a str, name: &str) -> nom::IResult<&'a str, &'a str> {
    let (remaining, word) = tag_no_case(name)(input)?;
    if remaining.starts_with(is_word_char) {
        return Err(nom::Err::Error(nom::error::Error::new(input, ErrorKind::Tag)));
    }
    Ok((remaining, word))
}

fn block_begin(input: &str) -> nom::IResult<&str, &str> {
    if let Ok(result) = keyword(input, "BEGIN") {
        return Ok(result);
    }
    tag("{")(input)
}

fn block_end(input: &str) -> nom::IResult<&str, &str> {
    if let Ok(result) = keyword(input, "END") {
        return Ok(result);
    }
    tag("}")(input)
}

/// Skip one token that is not part of a known statement. Ex: `VERSIONINFO`, `0x409` or `,`
fn skip_token(input: &str) -> nom::IResult<&str, ()> {
    if input.starts_with('"') {
        let (remaining, _) = quoted_string(input)?;
        return Ok((remaining, ()));
    }

    let word: nom::IResult<&str, &str> = take_while1(is_token_char)(input);
    if let Ok((remaining, _)) = word {
        return Ok((remaining, ()));
    }

    let mut chars = input.chars();
    chars.next();
    Ok((chars.as_str(), ()))
}

/// Parse `BLOCK "name"` and return the text after it
fn block_statement(input: &str) -> nom::IResult<&str, String> {
    let (input, _) = keyword(input, "BLOCK")?;
    let (input, _) = multispace0(input)?;
    let (input, name) = quoted_string(input)?;
    Ok((input, String::from_utf8_lossy(&name).to_string()))
}

/// Parse `VALUE "key", "value"`. Whitespace between the parts may include line breaks
fn value_statement(input: &str) -> nom::IResult<&str, (Vec<u8>, Vec<u8>)> {
    let (input, _) = keyword(input, "VALUE")?;
    let (input, _) = multispace0(input)?;
    let (input, key) = quoted_string(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char(',')(input)?;
    let (input, _) = multispace0(input)?;
    let (input, value) = quoted_string(input)?;
    Ok((input, (key, value)))
}

/// Parse a resource compiler string literal. `""` is a literal quote and `\0` ends the stored value
fn quoted_string(input: &str) -> nom::IResult<&str, Vec<u8>> {
    let (input, _) = char('"')(input)?;

    let mut value = String::new();
    let mut terminated = false;
    let mut chars = input.char_indices().peekable();

    while let Some((index, character)) = chars.next() {
        let resolved = match character {
            '"' => {
                if let Some((_, '"')) = chars.peek() {
                    chars.next();
                    Some('"')
                } else {
                    return Ok((&input[index + 1..], value.into_bytes()));
                }
            }
            '\\' => match chars.next() {
                Some((_, 'n')) => Some('\n'),
                Some((_, 'r')) => Some('\r'),
                Some((_, 't')) => Some('\t'),
                Some((_, '\\')) => Some('\\'),
                Some((_, '"')) => Some('"'),
                Some((_, '0')) => {
                    terminated = true;
                    None
                }
                Some((_, other)) => {
                    if !terminated {
                        value.push('\\');
                    }
                    Some(other)
                }
                None => None,
            },
            _ => Some(character),
        };

        if let Some(resolved_char) = resolved {
            if !terminated {
                value.push(resolved_char);
            }
        }
    }

    Err(nom::Err::Error(nom::error::Error::new(input, ErrorKind::Char)))
}
