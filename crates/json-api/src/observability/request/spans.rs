//! Route naming for request spans.

use uuid::Uuid;

/// Collapse identifier segments so spans for the same route share a name.
pub(super) fn route_pattern(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut pattern = String::from("/");

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            pattern.push('/');
        }

        if Uuid::try_parse(segment).is_ok() {
            pattern.push_str("{uuid}");
        } else {
            pattern.push_str(segment);
        }
    }

    pattern
}
