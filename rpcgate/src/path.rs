//! 路径模板：`/users/${id}/posts/${postId}`
//!
//! 占位符写作 `${name}`。宽松版本 [`resolve_path`] 对缺失的参数保留原样，
//! 严格版本 [`try_resolve_path`] 则报错。

use std::collections::HashMap;

use crate::error::{Error, Result};

const MARKER_OPEN: &str = "${";
const MARKER_CLOSE: char = '}';

/// 参数名对应的占位符文本，`id` -> `${id}`
pub fn marker(name: &str) -> String {
    format!("{MARKER_OPEN}{name}{MARKER_CLOSE}")
}

/// 按 `params` 的迭代顺序，把每个 key 的第一个占位符替换为对应的值。
///
/// - 模板中有、`params` 中没有的占位符原样保留
/// - `params` 中多余的 key 被忽略
pub fn resolve_path<I, K, V>(pattern: &str, params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    params.into_iter().fold(pattern.to_string(), |path, (key, value)| {
        path.replacen(&marker(key.as_ref()), value.as_ref(), 1)
    })
}

/// 同 [`resolve_path`]，但模板中有占位符得不到参数时返回 [`Error::UnresolvedPlaceholder`]。
///
/// 只检查 `pattern` 本身的占位符：参数值里出现的 `${x}` 不算未替换。
/// 同名占位符出现 N 次，需要提供 N 个同名参数。
pub fn try_resolve_path<I, K, V>(pattern: &str, params: I) -> Result<String>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let params: Vec<(K, V)> = params.into_iter().collect();

    let mut supplied: HashMap<&str, usize> = HashMap::new();
    for (key, _) in &params {
        *supplied.entry(key.as_ref()).or_default() += 1;
    }
    let unresolved = placeholders(pattern).into_iter().find(|name| match supplied.get_mut(name) {
        Some(n) if *n > 0 => {
            *n -= 1;
            false
        }
        _ => true,
    });

    let path = resolve_path(pattern, params.iter().map(|(k, v)| (k.as_ref(), v.as_ref())));
    match unresolved {
        Some(name) => Err(Error::UnresolvedPlaceholder {
            name: name.to_string(),
            path,
        }),
        None => Ok(path),
    }
}

/// 按出现顺序列出模板里的占位符名称（可能重复）
pub fn placeholders(pattern: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = pattern;
    while let Some(start) = rest.find(MARKER_OPEN) {
        let after = &rest[start + MARKER_OPEN.len()..];
        let Some(end) = after.find(MARKER_CLOSE) else {
            break;
        };
        names.push(&after[..end]);
        rest = &after[end + MARKER_CLOSE.len_utf8()..];
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashMap};

    #[test]
    fn resolves_every_supplied_placeholder() {
        let path = resolve_path("/users/${id}/posts/${postId}", [("id", "7"), ("postId", "42")]);
        assert_eq!(path, "/users/7/posts/42");
    }

    #[test]
    fn order_of_params_does_not_matter() {
        let mut params = HashMap::new();
        params.insert("postId".to_string(), "42".to_string());
        params.insert("id".to_string(), "7".to_string());
        assert_eq!(resolve_path("/users/${id}/posts/${postId}", &params), "/users/7/posts/42");
    }

    #[test]
    fn extra_params_are_ignored() {
        let pattern = "/patients/${patient_id}/visits/";
        let base = resolve_path(pattern, [("patient_id", "3")]);
        let extra = resolve_path(pattern, [("patient_id", "3"), ("pk", "9"), ("unused", "x")]);
        assert_eq!(base, extra);
        assert_eq!(extra, "/patients/3/visits/");
    }

    #[test]
    fn missing_params_leave_marker_verbatim() {
        let path = resolve_path("/users/${id}/posts/${postId}", [("id", "7")]);
        assert_eq!(path, "/users/7/posts/${postId}");
    }

    #[test]
    fn only_first_occurrence_is_replaced() {
        let path = resolve_path("/${id}/${id}", BTreeMap::from([("id", "1")]));
        assert_eq!(path, "/1/${id}");
    }

    #[test]
    fn pattern_without_placeholders_is_unchanged() {
        assert_eq!(resolve_path("/users/", [("id", "7")]), "/users/");
        assert_eq!(resolve_path("/users/", Vec::<(String, String)>::new()), "/users/");
    }

    #[test]
    fn strict_resolution_reports_first_missing_name() {
        let err = try_resolve_path("/users/${id}/posts/${postId}", [("id", "7")]).unwrap_err();
        match err {
            Error::UnresolvedPlaceholder { name, path } => {
                assert_eq!(name, "postId");
                assert_eq!(path, "/users/7/posts/${postId}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(try_resolve_path("/users/${id}", [("id", "7")]).unwrap(), "/users/7");
    }

    #[test]
    fn strict_resolution_ignores_markers_inside_values() {
        let path = try_resolve_path("/templates/${name}", [("name", "${raw}")]).unwrap();
        assert_eq!(path, "/templates/${raw}");
    }

    #[test]
    fn strict_resolution_needs_one_param_per_occurrence() {
        let err = try_resolve_path("/${id}/${id}", [("id", "1")]).unwrap_err();
        assert!(matches!(err, Error::UnresolvedPlaceholder { ref name, ref path } if name == "id" && path == "/1/${id}"));
        assert_eq!(try_resolve_path("/${id}/${id}", [("id", "1"), ("id", "2")]).unwrap(), "/1/2");
    }

    #[test]
    fn placeholders_in_order() {
        assert_eq!(placeholders("/a/${x}/b/${y}/${x}"), vec!["x", "y", "x"]);
        assert_eq!(placeholders("/a/${unterminated"), Vec::<&str>::new());
        assert!(placeholders("/plain").is_empty());
    }
}
