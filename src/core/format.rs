//! Printf-style template rendering
//!
//! Every consumer of an [`Event`](super::Event) renders it through [`render`],
//! so filtering, prefixing and emission all agree on one substitution
//! convention. Supported verbs: `%v %s %d %f %t %q %x %c %%`, with optional
//! `-`/`0` flags, a width and a `.precision`.
//!
//! Mismatches never fail; they are rendered inline:
//!
//! ```
//! use rust_logger_pipeline::core::format::render;
//! use rust_logger_pipeline::Value;
//!
//! assert_eq!(render("x=%d", &[Value::from(5)]), "x=5");
//! assert_eq!(render("x=%d", &[]), "x=%!d(MISSING)");
//! assert_eq!(render("x=%d", &[Value::from("hi")]), "x=%!d(string=hi)");
//! assert_eq!(render("x", &[Value::from(1)]), "x%!(EXTRA int=1)");
//! ```

use super::value::Value;
use std::fmt::Write;

const MAX_WIDTH: usize = 1_000_000;

#[derive(Debug, Default, Clone, Copy)]
struct Spec {
    left: bool,
    zero: bool,
    width: Option<usize>,
    precision: Option<usize>,
}

#[cfg(test)]
thread_local! {
    /// Number of `render` calls made on this thread
    pub(crate) static RENDER_CALLS: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

/// Substitute `args` into `format`
pub fn render(format: &str, args: &[Value]) -> String {
    #[cfg(test)]
    RENDER_CALLS.with(|c| c.set(c.get() + 1));

    let mut out = String::with_capacity(format.len() + args.len() * 8);
    let mut chars = format.chars().peekable();
    let mut next_arg = 0;

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        let mut spec = Spec::default();
        while let Some(&flag) = chars.peek() {
            match flag {
                '-' => spec.left = true,
                '0' => spec.zero = true,
                '+' | ' ' | '#' => {}
                _ => break,
            }
            chars.next();
        }
        spec.width = take_number(&mut chars);
        if spec.width.is_some_and(|w| w > MAX_WIDTH) {
            out.push_str("%!(BADWIDTH)");
            spec.width = None;
        }
        if chars.peek() == Some(&'.') {
            chars.next();
            spec.precision = Some(take_number(&mut chars).unwrap_or(0));
            if spec.precision.is_some_and(|p| p > MAX_WIDTH) {
                out.push_str("%!(BADPREC)");
                spec.precision = None;
            }
        }

        let verb = match chars.next() {
            Some(v) => v,
            None => {
                out.push_str("%!(NOVERB)");
                break;
            }
        };
        if verb == '%' {
            out.push('%');
            continue;
        }

        match args.get(next_arg) {
            Some(arg) => {
                next_arg += 1;
                match format_verb(verb, arg, spec) {
                    Some(text) => out.push_str(&pad(text, spec)),
                    None => bad_verb(&mut out, verb, arg),
                }
            }
            None => {
                let _ = write!(out, "%!{}(MISSING)", verb);
            }
        }
    }

    if next_arg < args.len() {
        out.push_str("%!(EXTRA ");
        for (i, arg) in args[next_arg..].iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            describe(&mut out, arg);
        }
        out.push(')');
    }

    out
}

fn take_number(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<usize> {
    let mut n: Option<usize> = None;
    while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
        n = Some(n.unwrap_or(0).saturating_mul(10).saturating_add(d as usize));
        chars.next();
    }
    n
}

fn format_verb(verb: char, arg: &Value, spec: Spec) -> Option<String> {
    let text = match (verb, arg) {
        ('v', Value::Float(f)) => match spec.precision {
            Some(p) => format!("{:.*}", p, f),
            None => f.to_string(),
        },
        ('v', v) => v.to_string(),
        ('s', Value::Str(_) | Value::Bytes(_) | Value::Json(_)) => {
            let s = arg.to_string();
            match spec.precision {
                Some(p) => s.chars().take(p).collect(),
                None => s,
            }
        }
        ('d', Value::Int(_) | Value::Uint(_)) => arg.to_string(),
        ('f', Value::Float(f)) => format!("{:.*}", spec.precision.unwrap_or(6), f),
        ('t', Value::Bool(b)) => b.to_string(),
        ('q', Value::Str(s)) => format!("{:?}", s),
        ('q', Value::Bytes(b)) => format!("{:?}", String::from_utf8_lossy(b)),
        ('q', Value::Char(c)) => format!("{:?}", c),
        ('x', Value::Int(i)) if *i < 0 => format!("-{:x}", i.unsigned_abs()),
        ('x', Value::Int(i)) => format!("{:x}", i),
        ('x', Value::Uint(u)) => format!("{:x}", u),
        ('x', Value::Str(s)) => hex(s.as_bytes()),
        ('x', Value::Bytes(b)) => hex(b),
        ('c', Value::Char(c)) => c.to_string(),
        ('c', Value::Int(i)) => char::from_u32(u32::try_from(*i).ok()?)?.to_string(),
        ('c', Value::Uint(u)) => char::from_u32(u32::try_from(*u).ok()?)?.to_string(),
        _ => return None,
    };
    Some(text)
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut s, b| {
        let _ = write!(s, "{:02x}", b);
        s
    })
}

fn pad(text: String, spec: Spec) -> String {
    let width = match spec.width {
        Some(w) => w,
        None => return text,
    };
    let len = text.chars().count();
    if len >= width {
        return text;
    }
    let fill = width - len;
    if spec.left {
        format!("{}{}", text, " ".repeat(fill))
    } else if spec.zero {
        match text.strip_prefix('-') {
            Some(digits) => format!("-{}{}", "0".repeat(fill), digits),
            None => format!("{}{}", "0".repeat(fill), text),
        }
    } else {
        format!("{}{}", " ".repeat(fill), text)
    }
}

fn bad_verb(out: &mut String, verb: char, arg: &Value) {
    let _ = write!(out, "%!{}(", verb);
    describe(out, arg);
    out.push(')');
}

fn describe(out: &mut String, arg: &Value) {
    match arg {
        Value::Null => out.push_str("<nil>"),
        v => {
            let _ = write!(out, "{}={}", v.kind(), v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v<T: Into<Value>>(x: T) -> Value {
        x.into()
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(render("hello", &[]), "hello");
        assert_eq!(render("100%%", &[]), "100%");
    }

    #[test]
    fn test_basic_verbs() {
        assert_eq!(render("x=%d", &[v(5)]), "x=5");
        assert_eq!(render("%s and %v", &[v("a"), v(true)]), "a and true");
        assert_eq!(render("%t", &[v(false)]), "false");
        assert_eq!(render("%q", &[v("hi")]), "\"hi\"");
        assert_eq!(render("%x", &[v(255)]), "ff");
        assert_eq!(render("%x", &[v("hi")]), "6869");
        assert_eq!(render("%c", &[v(65)]), "A");
        assert_eq!(render("%v", &[Value::Null]), "<nil>");
    }

    #[test]
    fn test_float_precision() {
        assert_eq!(render("%f", &[v(1.5)]), "1.500000");
        assert_eq!(render("%.2f", &[v(3.14159)]), "3.14");
        assert_eq!(render("%v", &[v(2.5)]), "2.5");
    }

    #[test]
    fn test_oversized_width() {
        assert_eq!(render("%9999999d", &[v(1)]), "%!(BADWIDTH)1");
        assert_eq!(render("%.9999999f", &[v(1.0)]), "%!(BADPREC)1.000000");
    }

    #[test]
    fn test_width() {
        assert_eq!(render("[%5d]", &[v(42)]), "[   42]");
        assert_eq!(render("[%-5s]", &[v("ab")]), "[ab   ]");
        assert_eq!(render("[%05d]", &[v(-42)]), "[-0042]");
        assert_eq!(render("[%.3s]", &[v("abcdef")]), "[abc]");
    }

    #[test]
    fn test_mismatches() {
        assert_eq!(render("%d", &[]), "%!d(MISSING)");
        assert_eq!(render("%d", &[v("x")]), "%!d(string=x)");
        assert_eq!(render("%s", &[v(1)]), "%!s(int=1)");
        assert_eq!(render("%z", &[v(1)]), "%!z(int=1)");
        assert_eq!(render("%d", &[Value::Null]), "%!d(<nil>)");
        assert_eq!(render("a%", &[]), "a%!(NOVERB)");
        assert_eq!(
            render("%d", &[v(1), v(2), v("a")]),
            "1%!(EXTRA int=2, string=a)"
        );
    }

    #[test]
    fn test_bytes_render_as_text() {
        assert_eq!(
            render("hit | %s", &[v(br#"{"a":1}"#.to_vec())]),
            r#"hit | {"a":1}"#
        );
    }
}
