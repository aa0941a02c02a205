//! XML documents the client writes itself. Everything else is caller-supplied XML.

use rand::Rng;

const PASSWORD_LEN: usize = 16;
const PASSWORD_CHARSET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

pub fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Random management password for computers switched to managed without one.
pub fn generate_management_password() -> String {
    let mut rng = rand::thread_rng();
    (0..PASSWORD_LEN)
        .map(|_| PASSWORD_CHARSET[rng.gen_range(0..PASSWORD_CHARSET.len())] as char)
        .collect()
}

/// Computer update touching only `general/remote_management`.
pub fn remote_management(managed: bool, username: &str, password: &str) -> String {
    format!(
        "<computer><general><remote_management>\
         <managed>{}</managed>\
         <management_username>{}</management_username>\
         <management_password>{}</management_password>\
         </remote_management></general></computer>",
        managed,
        escape_xml(username),
        escape_xml(password)
    )
}

/// Static group membership change. Empty sides are left out.
pub fn group_membership(additions: &[i64], deletions: &[i64]) -> String {
    let mut xml = String::from("<computer_group>");
    for (tag, ids) in [("computer_additions", additions), ("computer_deletions", deletions)] {
        if ids.is_empty() {
            continue;
        }
        xml.push_str(&format!("<{}>", tag));
        for id in ids {
            xml.push_str(&format!("<computer><id>{}</id></computer>", id));
        }
        xml.push_str(&format!("</{}>", tag));
    }
    xml.push_str("</computer_group>");
    xml
}
