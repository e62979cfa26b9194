//! Truncated token breakdowns for terminal output

use tokscope_tokens::TokenId;

/// How many entries of each list the interactive report shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayLimits {
    pub max_token_strings: usize,
    pub max_token_ids: usize,
}

impl Default for DisplayLimits {
    fn default() -> Self {
        Self {
            max_token_strings: 20,
            max_token_ids: 30,
        }
    }
}

/// Escape a token fragment so control characters and quotes are visible
pub fn escape_token(token: &str) -> String {
    token.escape_debug().to_string()
}

/// `[1, 2, 3]`
pub fn format_id_list(ids: &[TokenId]) -> String {
    let items: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
    format!("[{}]", items.join(", "))
}

fn more_marker(total: usize, limit: usize) -> Option<String> {
    (total > limit).then(|| format!("... ({} more)", total - limit))
}

/// `["Hello", ",", " world", ... (5 more)]`
pub fn format_token_strings(tokens: &[String], limit: usize) -> String {
    let mut items: Vec<String> = tokens
        .iter()
        .take(limit)
        .map(|token| format!("\"{}\"", escape_token(token)))
        .collect();
    if let Some(marker) = more_marker(tokens.len(), limit) {
        items.push(marker);
    }
    format!("[{}]", items.join(", "))
}

/// `[9906, 11, 1917] ... (5 more)`
pub fn format_token_ids(ids: &[TokenId], limit: usize) -> String {
    let shown = format_id_list(&ids[..ids.len().min(limit)]);
    match more_marker(ids.len(), limit) {
        Some(marker) => format!("{} {}", shown, marker),
        None => shown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("t{}", i)).collect()
    }

    #[test]
    fn test_escape_token() {
        assert_eq!(escape_token("plain"), "plain");
        assert_eq!(escape_token("a\nb"), "a\\nb");
        assert_eq!(escape_token("\t"), "\\t");
        assert_eq!(escape_token("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(escape_token("back\\slash"), "back\\\\slash");
        assert_eq!(escape_token("café"), "café");
    }

    #[test]
    fn test_format_id_list() {
        assert_eq!(format_id_list(&[]), "[]");
        assert_eq!(format_id_list(&[9906, 11, 1917, 0]), "[9906, 11, 1917, 0]");
    }

    #[test]
    fn test_token_strings_under_limit() {
        let out = format_token_strings(&strings(3), 20);
        assert_eq!(out, "[\"t0\", \"t1\", \"t2\"]");
    }

    #[test]
    fn test_token_strings_exactly_at_limit() {
        let out = format_token_strings(&strings(20), 20);
        assert!(!out.contains("more"));
        assert_eq!(out.matches('"').count(), 40);
    }

    #[test]
    fn test_token_strings_truncated() {
        let out = format_token_strings(&strings(25), 20);
        assert!(out.contains("\"t19\""));
        assert!(!out.contains("\"t20\""));
        assert!(out.ends_with(", ... (5 more)]"));
        assert_eq!(out.matches('"').count(), 40);
    }

    #[test]
    fn test_token_ids_truncated() {
        let ids: Vec<TokenId> = (100..135).collect();
        let out = format_token_ids(&ids, 30);
        assert!(out.starts_with("[100, 101,"));
        assert!(out.contains("129]"));
        assert!(!out.contains("130"));
        assert!(out.ends_with("] ... (5 more)"));
    }

    #[test]
    fn test_token_ids_under_limit() {
        assert_eq!(format_token_ids(&[1, 2], 30), "[1, 2]");
        assert_eq!(format_token_ids(&[], 30), "[]");
    }
}
