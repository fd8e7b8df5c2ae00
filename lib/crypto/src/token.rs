pub type Token<const N: usize> = [u8; N];

/// Parses a token written as `2 * N` hex digits.
pub fn parse_token<const N: usize>(hex: &str) -> Option<Token<N>> {
    if hex.len() != N * 2 {
        return None;
    }

    let mut result = [0; N];
    let mut iterator = TokenIterator { token: hex, pos: 0 };

    for byte in result.iter_mut() {
        *byte = iterator.next()?;
    }

    Some(result)
}

struct TokenIterator<'t> {
    token: &'t str,
    pos: usize,
}

impl TokenIterator<'_> {
    fn next_value(&mut self) -> Option<u8> {
        if self.pos >= self.token.len() {
            return None;
        }

        let value = self.token.as_bytes()[self.pos];
        self.pos += 1;

        match value {
            b'0'..=b'9' => Some(value - b'0'),
            b'a'..=b'f' => Some(value - b'a' + 10),
            b'A'..=b'F' => Some(value - b'A' + 10),
            _ => None,
        }
    }
}

impl Iterator for TokenIterator<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        let v1 = self.next_value()?;
        let v2 = self.next_value()?;

        Some((v1 << 4) + v2)
    }
}
