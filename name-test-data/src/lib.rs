//! test data shared between the name table crates.

/// Names of a sample of codepoints, in `UnicodeData.txt` order.
///
/// Each line is `CODE;NAME` with the code in hex; lines starting with `#`
/// are comments. Parse with [`parse_names`].
pub static UNICODE_SAMPLE: &str = include_str!("../test_data/unicode_sample.txt");

/// Parse `CODE;NAME` lines into `(codepoint, name)` pairs.
///
/// Blank lines and `#` comments are skipped. Panics on malformed lines; this
/// is only intended for the fixtures in this crate.
pub fn parse_names(text: &str) -> Vec<(u32, &str)> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| {
            let (code, name) = line.split_once(';').expect("missing ';' separator");
            let code = u32::from_str_radix(code, 16).expect("invalid hex codepoint");
            (code, name)
        })
        .collect()
}

pub mod tables {
    /// Tables for `U+0041`, `U+0042` and `U+1F600`.
    ///
    /// The first two share the prefix `"Latin Capital Letter "`; the last has
    /// no prefix and starts a new run.
    #[rustfmt::skip]
    pub static SIMPLE: &[u8] = &[
        0x00, 0x01,             // version 1
        0x00, 0x16,             // maxNameLength 22
        0x00, 0x00, 0x00, 0x02, // sequenceCount 2
        0x00, 0x00, 0x00, 0x03, // nameCount 3
        0x00, 0x01,             // prefixCount 1
        0x00, 0x00,             // blockCount 0
        // sequence records
        0x00, 0x00, 0x00, 0x41, 0x00, 0x00, 0x00, 0x00, // U+0041 -> row 0
        0x00, 0x01, 0xF6, 0x00, 0x00, 0x00, 0x00, 0x02, // U+1F600 -> row 2
        // prefix offsets
        0x00, 0x00, 0x00, 0x00,
        // name records
        0x00, 0x00, 0x00, 0x00, 0x00, 0x16, // prefix 0, "A"
        0x00, 0x00, 0x00, 0x00, 0x00, 0x18, // prefix 0, "B"
        0xFF, 0xFF, 0x00, 0x00, 0x00, 0x1A, // no prefix, "Grinning Face"
        // string data
        0x15, b'L', b'a', b't', b'i', b'n', b' ', b'C', b'a', b'p', b'i', b't', b'a', b'l', b' ',
              b'L', b'e', b't', b't', b'e', b'r', b' ',
        0x01, b'A',
        0x01, b'B',
        0x0D, b'G', b'r', b'i', b'n', b'n', b'i', b'n', b'g', b' ', b'F', b'a', b'c', b'e',
    ];

    /// The entries that [`SIMPLE`] was built from.
    pub static SIMPLE_ENTRIES: &[(u32, &str)] = &[
        (0x41, "Latin Capital Letter A"),
        (0x42, "Latin Capital Letter B"),
        (0x1F600, "Grinning Face"),
    ];

    /// Tables where one name is identical to its prefix, so its suffix is empty.
    #[rustfmt::skip]
    pub static EMPTY_SUFFIX: &[u8] = &[
        0x00, 0x01,             // version 1
        0x00, 0x07,             // maxNameLength 7
        0x00, 0x00, 0x00, 0x01, // sequenceCount 1
        0x00, 0x00, 0x00, 0x02, // nameCount 2
        0x00, 0x01,             // prefixCount 1
        0x00, 0x00,             // blockCount 0
        // sequence records
        0x00, 0x00, 0x00, 0x10, 0x00, 0x00, 0x00, 0x00, // U+0010 -> row 0
        // prefix offsets
        0x00, 0x00, 0x00, 0x00,
        // name records
        0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, // prefix 0, empty suffix
        0x00, 0x00, 0x00, 0x00, 0x00, 0x05, // prefix 0, "Def"
        // string data
        0x04, b'A', b'b', b'c', b'-',
        0x03, b'D', b'e', b'f',
    ];

    /// The entries that [`EMPTY_SUFFIX`] was built from.
    pub static EMPTY_SUFFIX_ENTRIES: &[(u32, &str)] = &[(0x10, "Abc-"), (0x11, "Abc-Def")];

    /// [`SIMPLE`], with two named blocks.
    ///
    /// Block names are stored after every prefix and suffix.
    #[rustfmt::skip]
    pub static WITH_BLOCKS: &[u8] = &[
        0x00, 0x01,             // version 1
        0x00, 0x16,             // maxNameLength 22
        0x00, 0x00, 0x00, 0x02, // sequenceCount 2
        0x00, 0x00, 0x00, 0x03, // nameCount 3
        0x00, 0x01,             // prefixCount 1
        0x00, 0x02,             // blockCount 2
        // sequence records
        0x00, 0x00, 0x00, 0x41, 0x00, 0x00, 0x00, 0x00, // U+0041 -> row 0
        0x00, 0x01, 0xF6, 0x00, 0x00, 0x00, 0x00, 0x02, // U+1F600 -> row 2
        // prefix offsets
        0x00, 0x00, 0x00, 0x00,
        // name records
        0x00, 0x00, 0x00, 0x00, 0x00, 0x16, // prefix 0, "A"
        0x00, 0x00, 0x00, 0x00, 0x00, 0x18, // prefix 0, "B"
        0xFF, 0xFF, 0x00, 0x00, 0x00, 0x1A, // no prefix, "Grinning Face"
        // block records
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x7F, 0x00, 0x00, 0x00, 0x28, // "Basic Latin"
        0x00, 0x01, 0xF6, 0x00, 0x00, 0x01, 0xF6, 0x4F, 0x00, 0x00, 0x00, 0x34, // "Emoticons"
        // string data
        0x15, b'L', b'a', b't', b'i', b'n', b' ', b'C', b'a', b'p', b'i', b't', b'a', b'l', b' ',
              b'L', b'e', b't', b't', b'e', b'r', b' ',
        0x01, b'A',
        0x01, b'B',
        0x0D, b'G', b'r', b'i', b'n', b'n', b'i', b'n', b'g', b' ', b'F', b'a', b'c', b'e',
        0x0B, b'B', b'a', b's', b'i', b'c', b' ', b'L', b'a', b't', b'i', b'n',
        0x09, b'E', b'm', b'o', b't', b'i', b'c', b'o', b'n', b's',
    ];

    /// The blocks that [`WITH_BLOCKS`] was built from, with [`SIMPLE_ENTRIES`].
    pub static WITH_BLOCKS_RANGES: &[(u32, u32, &str)] =
        &[(0x0000, 0x007F, "Basic Latin"), (0x1F600, 0x1F64F, "Emoticons")];
}
