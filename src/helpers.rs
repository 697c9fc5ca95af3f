pub(crate) fn in_range(mut v: usize, start: usize, end: usize) -> usize {
    if v < start {
        v = start;
    }
    if v > end {
        v = end;
    }
    v
}

pub(crate) fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            c => out.push(c),
        }
    }
    out
}

/// Drops control characters so text cannot smuggle terminal escape
/// sequences; tabs become a single space.
pub(crate) fn strip_controls(s: &str) -> String {
    s.chars()
        .filter_map(|ch| match ch {
            '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

/// Reverse of `escape_html` for the entities server templates emit:
/// the five XML named entities, `&nbsp;`, `&#NN;` and `&#xHH;`.
/// Unknown or unterminated entities are kept verbatim.
pub fn decode_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        rest = &rest[start..];
        let end = match rest[1..].find(|c: char| c == ';' || c == '&') {
            Some(end) if rest.as_bytes()[end + 1] == b';' => end + 1,
            _ => {
                out.push('&');
                rest = &rest[1..];
                continue;
            }
        };
        let name = &rest[1..end];
        let decoded = match name {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            "nbsp" => Some('\u{a0}'),
            _ => {
                let code = if let Some(hex) = name
                    .strip_prefix("#x")
                    .or_else(|| name.strip_prefix("#X"))
                {
                    u32::from_str_radix(hex, 16).ok()
                } else if let Some(dec) = name.strip_prefix('#') {
                    dec.parse::<u32>().ok()
                } else {
                    None
                };
                code.and_then(char::from_u32)
            }
        };
        match decoded {
            Some(ch) => {
                out.push(ch);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic() {
        assert_eq!(escape_html("<&>\"'"), "&lt;&amp;&gt;&quot;&#x27;");
    }

    #[test]
    fn unicode_kept() {
        assert_eq!(escape_html("zażółć & <"), "zażółć &amp; &lt;");
    }

    #[test]
    fn already_escaped_becomes_double_escaped() {
        assert_eq!(escape_html("&amp;"), "&amp;amp;");
    }

    #[test]
    fn script_injection_becomes_safe() {
        assert_eq!(escape_html("</script>"), "&lt;&#x2F;script&gt;");
    }

    #[test]
    fn decode_named_and_numeric() {
        assert_eq!(
            decode_entities("if a &lt; b &amp;&amp; c &gt; d: print(&quot;x&#39;&#x41;&quot;)"),
            "if a < b && c > d: print(\"x'A\")"
        );
    }

    #[test]
    fn decode_keeps_unknown_and_bare_ampersands() {
        assert_eq!(decode_entities("a & b &bogus; &#zz; &lt"), "a & b &bogus; &#zz; &lt");
    }

    #[test]
    fn decode_inverts_escape() {
        let src = "<div class=\"x\">a/b & 'c'</div>";
        assert_eq!(decode_entities(&escape_html(src)), src);
    }

    #[test]
    fn controls_removed() {
        assert_eq!(strip_controls("a\x1b[31mb\tc\u{7f}\u{9b}d"), "a[31mb cd");
    }

    #[test]
    fn clamp_to_range() {
        assert_eq!(in_range(5, 0, 3), 3);
        assert_eq!(in_range(0, 1, 3), 1);
        assert_eq!(in_range(2, 0, 3), 2);
        assert_eq!(in_range(4, 0, 0), 0);
    }
}
