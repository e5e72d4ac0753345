// Take in some bytes and return a hex view of them

/// `base` is added to every offset, so a block can be shown where it sits in the store.
pub fn hex_view(bytes: &[u8], base: u64) -> String {
    let mut screen_string = String::new();

    // push the header
    screen_string.push_str(" Offset(h)  00 01 02 03 04 05 06 07 08 09 0A 0B 0C 0D 0E 0F\n");

    for (row, chunk) in bytes.chunks(16).enumerate() {
        // first goes the offset, padded so its 10 characters long
        let offset = base + row as u64 * 16;
        let mut line = format!("{offset:0>10X}  ");

        // now for all the numbers
        for i in 0..16 {
            match chunk.get(i) {
                Some(byte) => line.push_str(&format!("{byte:02X} ")),
                None => line.push_str("   "),
            }
        }

        // now for the text version
        line.push(' ');
        line.extend(chunk.iter().map(|byte| {
            let character = char::from(*byte);
            if !character.is_ascii() || character.is_ascii_control() {
                '.'
            } else {
                character
            }
        }));

        // line is done. Add it to the screen
        screen_string.push_str(line.trim_end());
        screen_string.push('\n');
    }

    // done!
    screen_string
}

#[cfg(test)]
mod tests {
    use super::hex_view;
    use test_log::test; // We want to see logs while testing.

    #[test]
    fn one_short_row() {
        let view = hex_view(b"docs\0", 0x200);
        let lines: Vec<&str> = view.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("0000000200  64 6F 63 73 00"));
        assert!(lines[1].ends_with("docs."));
    }

    #[test]
    fn full_block_is_32_rows() {
        let view = hex_view(&[0u8; 512], 0);
        assert_eq!(view.lines().count(), 33);
        assert!(view.lines().last().unwrap_or_default().starts_with("00000001F0"));
    }
}
