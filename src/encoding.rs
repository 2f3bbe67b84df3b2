/*!
 * Output character encodings.
 *
 * RIS consumers differ in what they accept, so text can be written as UTF-8,
 * as UTF-16 code units, or folded to ASCII / Windows-1252 ("ANSI") through
 * fixed substitution tables for typographic punctuation and accented Latin
 * letters. Characters without a table entry pass through as UTF-8.
 */

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Character encoding of the RIS output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    Ascii,
    #[default]
    Ansi,
    Utf8,
    Utf16,
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Ascii => "ascii",
            Self::Ansi => "ansi",
            Self::Utf8 => "utf8",
            Self::Utf16 => "utf16",
        };
        f.write_str(name)
    }
}

/// Encode text for the output file
pub fn encode(text: &str, encoding: Encoding) -> Vec<u8> {
    match encoding {
        Encoding::Utf8 => text.as_bytes().to_vec(),
        Encoding::Utf16 => text
            .encode_utf16()
            .flat_map(|unit| unit.to_ne_bytes())
            .collect(),
        Encoding::Ascii => {
            let mut out = String::with_capacity(text.len());
            for c in text.chars() {
                match ascii_substitute(c) {
                    Some(replacement) => out.push_str(replacement),
                    None => out.push(c),
                }
            }
            out.into_bytes()
        }
        Encoding::Ansi => {
            let mut out = Vec::with_capacity(text.len());
            let mut buf = [0u8; 4];
            for c in text.chars() {
                match ansi_byte(c) {
                    Some(byte) => out.push(byte),
                    None => out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes()),
                }
            }
            out
        }
    }
}

/// ASCII replacement of a character, if the table has one
pub fn ascii_substitute(c: char) -> Option<&'static str> {
    let replacement = match c {
        '\u{201C}' | '\u{201D}' => "\"",
        '\u{2018}' | '\u{2019}' => "'",
        '\u{2013}' => "-",
        '\u{2014}' => "--",
        '\u{2026}' => "...",
        '\u{AB}' => "<<",
        '\u{BB}' => ">>",
        '\u{2020}' => "",
        '\u{A7}' => "ss",
        '\u{B6}' => "pp",
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' => "A",
        'È' | 'É' | 'Ê' | 'Ë' => "E",
        'Ì' | 'Í' | 'Î' | 'Ï' => "I",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' => "O",
        'Ù' | 'Ú' | 'Û' | 'Ü' => "U",
        'Ý' | 'Ÿ' => "Y",
        'Ñ' => "N",
        'Ç' => "C",
        'à' | 'á' | 'â' | 'ã' | 'ä' => "a",
        'è' | 'é' | 'ê' | 'ë' => "e",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => "o",
        'ù' | 'ú' | 'û' | 'ü' => "u",
        'ý' | 'ÿ' => "y",
        'ñ' => "n",
        'ç' => "c",
        'Æ' | 'æ' => "ae",
        'Œ' => "OE",
        'œ' => "oe",
        '\u{A0}' => " ",
        _ => return None,
    };
    Some(replacement)
}

/// Windows-1252 byte of a character, if the table has one
pub fn ansi_byte(c: char) -> Option<u8> {
    let byte = match c {
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        'Œ' => 0x8C,
        'œ' => 0x9C,
        'Ÿ' => 0x9F,
        // Latin-1 range maps onto itself in Windows-1252
        '\u{A0}' | '\u{A7}' | '\u{AB}' | '\u{B6}' | '\u{BB}' => c as u8,
        'À'..='Ö' | 'Ø'..='ö' | 'ø'..='ÿ' if is_table_letter(c) => c as u8,
        _ => return None,
    };
    Some(byte)
}

// Accented letters covered by the substitution tables
fn is_table_letter(c: char) -> bool {
    ascii_substitute(c).is_some()
}
