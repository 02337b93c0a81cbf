//! RouterOS `/ip dns static` entries and their script rendering.
//!
//! Format reference: <https://wiki.mikrotik.com/wiki/Manual:IP/DNS#Static_DNS_Entries>
//!
//! Values are written verbatim. Callers must keep `"` and `\` out of every
//! field (see [`crate::validators::contains_illegal_symbols`]).

use std::io::{self, Write};

/// One static DNS entry of the generated script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DnsStaticEntry {
    /// IP address, e.g. `0.0.0.0`. Entries without one are never rendered.
    pub address: String,
    /// Short description of the item.
    pub comment: String,
    pub disabled: bool,
    /// Host name, e.g. `www.example.com`.
    pub name: String,
    /// Regular expression, e.g. `.*\.example\.com`.
    pub regexp: String,
    /// Time to live, e.g. `1d`.
    pub ttl: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub prefix: String,
    pub postfix: String,
    /// Write optional properties even when they are empty.
    pub render_empty: bool,
}

impl RenderOptions {
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Property {
    Address,
    Comment,
    Disabled,
    Name,
    Regexp,
    Ttl,
}

enum PropertyValue<'a> {
    Bare(&'a str),
    Quoted(&'a str),
    Flag(bool),
}

/// Property order of a rendered line.
const RENDER_ORDER: [Property; 6] = [
    Property::Address,
    Property::Comment,
    Property::Disabled,
    Property::Name,
    Property::Regexp,
    Property::Ttl,
];

impl Property {
    const fn token(self) -> &'static str {
        match self {
            Property::Address => "address",
            Property::Comment => "comment",
            Property::Disabled => "disabled",
            Property::Name => "name",
            Property::Regexp => "regexp",
            Property::Ttl => "ttl",
        }
    }

    fn value(self, entry: &DnsStaticEntry) -> PropertyValue<'_> {
        match self {
            Property::Address => PropertyValue::Bare(&entry.address),
            Property::Comment => PropertyValue::Quoted(&entry.comment),
            Property::Disabled => PropertyValue::Flag(entry.disabled),
            Property::Name => PropertyValue::Quoted(&entry.name),
            Property::Regexp => PropertyValue::Quoted(&entry.regexp),
            Property::Ttl => PropertyValue::Quoted(&entry.ttl),
        }
    }
}

impl DnsStaticEntry {
    pub fn new(address: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Format the entry as a single script line (no line break).
    pub fn format(&self, options: &RenderOptions) -> String {
        let mut buf = String::with_capacity(
            self.address.len()
                + self.comment.len()
                + self.name.len()
                + self.regexp.len()
                + self.ttl.len()
                + options.prefix.len()
                + options.postfix.len()
                + 64,
        );
        self.format_into(&mut buf, options);
        buf
    }

    fn format_into(&self, buf: &mut String, options: &RenderOptions) {
        if !options.prefix.is_empty() {
            buf.push_str(&options.prefix);
            buf.push(' ');
        }

        for (idx, property) in RENDER_ORDER.iter().enumerate() {
            let token = property.token();
            let separator = if idx == 0 { "" } else { " " };

            match property.value(self) {
                PropertyValue::Bare(value) => {
                    buf.push_str(separator);
                    buf.push_str(token);
                    buf.push('=');
                    buf.push_str(value);
                }
                PropertyValue::Quoted(value) => {
                    if value.is_empty() && !options.render_empty {
                        continue;
                    }
                    buf.push_str(separator);
                    buf.push_str(token);
                    buf.push_str("=\"");
                    buf.push_str(value);
                    buf.push('"');
                }
                PropertyValue::Flag(flag) => {
                    buf.push_str(separator);
                    buf.push_str(token);
                    buf.push('=');
                    buf.push_str(if flag { "yes" } else { "no" });
                }
            }
        }

        if !options.postfix.is_empty() {
            buf.push(' ');
            buf.push_str(&options.postfix);
        }
    }
}

/// Render entries line by line into `to`, returning the number of bytes written.
///
/// Lines are separated by `\n` with no trailing line break. Entries with an
/// empty address are skipped; zero renderable entries write nothing.
pub fn render_entries<W: Write>(
    entries: &[DnsStaticEntry],
    to: &mut W,
    options: &RenderOptions,
) -> io::Result<usize> {
    let mut buf = String::with_capacity(128);
    let mut total = 0usize;

    for entry in entries.iter().filter(|e| !e.address.is_empty()) {
        if total > 0 {
            buf.push('\n');
        }
        entry.format_into(&mut buf, options);

        to.write_all(buf.as_bytes())?;
        total += buf.len();

        buf.clear();
    }

    Ok(total)
}
