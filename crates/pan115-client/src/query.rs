//! Query parameter composition.
//!
//! Every endpoint starts from its own default parameter map and applies an
//! ordered list of [`QueryOption`]s on top. Options are applied in the order
//! given; when two options write the same key the later one wins.
//!
//! A non-positive number or an empty string never overrides a default. Callers
//! ask for "the endpoint default" by passing such a value, which lets typed
//! query structs always emit their full option list.

use std::collections::BTreeMap;

/// Composed request parameters, keyed by wire name.
pub type QueryParams = BTreeMap<String, String>;

/// A named mutation of a pending parameter set.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOption {
    /// `offset`
    Offset(i64),
    /// `limit`
    Limit(i64),
    /// `page`
    Page(i64),
    /// `search_value`
    SearchValue(String),
    /// `aid` (storage area; 1 = files, 7 = everything)
    Aid(String),
    /// `cid` (directory scope)
    Cid(String),
    /// `date`
    Date(String),
    /// `pick_code`
    PickCode(String),
    /// `type` (0 all, 1 folder, 2 document, 3 image, 4 video, 5 audio, 6 archive)
    FileType(i64),
    /// `count_folders`
    CountFolders(i64),
    /// `source`
    Source(String),
    /// `star`
    Star(String),
    /// `suffix`
    Suffix(String),
    /// `o` (sort field)
    Order(String),
    /// `asc`; `None` keeps the default direction.
    Asc(Option<bool>),
}

impl QueryOption {
    /// The wire key this option writes.
    pub fn key(&self) -> &'static str {
        match self {
            QueryOption::Offset(_) => "offset",
            QueryOption::Limit(_) => "limit",
            QueryOption::Page(_) => "page",
            QueryOption::SearchValue(_) => "search_value",
            QueryOption::Aid(_) => "aid",
            QueryOption::Cid(_) => "cid",
            QueryOption::Date(_) => "date",
            QueryOption::PickCode(_) => "pick_code",
            QueryOption::FileType(_) => "type",
            QueryOption::CountFolders(_) => "count_folders",
            QueryOption::Source(_) => "source",
            QueryOption::Star(_) => "star",
            QueryOption::Suffix(_) => "suffix",
            QueryOption::Order(_) => "o",
            QueryOption::Asc(_) => "asc",
        }
    }

    /// The value this option writes, or `None` when it defers to the default.
    fn value(&self) -> Option<String> {
        match self {
            QueryOption::Offset(n)
            | QueryOption::Limit(n)
            | QueryOption::Page(n)
            | QueryOption::FileType(n)
            | QueryOption::CountFolders(n) => (*n > 0).then(|| n.to_string()),
            QueryOption::SearchValue(s)
            | QueryOption::Aid(s)
            | QueryOption::Cid(s)
            | QueryOption::Date(s)
            | QueryOption::PickCode(s)
            | QueryOption::Source(s)
            | QueryOption::Star(s)
            | QueryOption::Suffix(s)
            | QueryOption::Order(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
            QueryOption::Asc(asc) => asc.map(|asc| if asc { "1" } else { "0" }.to_string()),
        }
    }

    /// Apply this option to `params`.
    pub fn apply(&self, params: &mut QueryParams) {
        if let Some(value) = self.value() {
            params.insert(self.key().to_string(), value);
        }
    }
}

/// Build the parameter map for one call.
pub fn compose(defaults: &[(&str, &str)], options: &[QueryOption]) -> QueryParams {
    let mut params: QueryParams = defaults
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    for option in options {
        option.apply(&mut params);
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULTS: &[(&str, &str)] = &[("offset", "0"), ("limit", "30"), ("asc", "1")];

    fn get<'a>(params: &'a QueryParams, key: &str) -> Option<&'a str> {
        params.get(key).map(String::as_str)
    }

    #[test]
    fn test_no_options_yields_defaults() {
        let params = compose(DEFAULTS, &[]);
        assert_eq!(params.len(), 3);
        assert_eq!(get(&params, "offset"), Some("0"));
        assert_eq!(get(&params, "limit"), Some("30"));
        assert_eq!(get(&params, "asc"), Some("1"));
    }

    #[test]
    fn test_non_positive_limit_keeps_default() {
        let params = compose(DEFAULTS, &[QueryOption::Limit(0)]);
        assert_eq!(get(&params, "limit"), Some("30"));

        let params = compose(DEFAULTS, &[QueryOption::Limit(-5)]);
        assert_eq!(get(&params, "limit"), Some("30"));
    }

    #[test]
    fn test_last_write_wins() {
        let params = compose(DEFAULTS, &[QueryOption::Offset(5), QueryOption::Offset(9)]);
        assert_eq!(get(&params, "offset"), Some("9"));
    }

    #[test]
    fn test_ignored_option_does_not_undo_earlier_write() {
        let params = compose(DEFAULTS, &[QueryOption::Limit(50), QueryOption::Limit(0)]);
        assert_eq!(get(&params, "limit"), Some("50"));
    }

    #[test]
    fn test_disjoint_options_commute() {
        let a = compose(
            DEFAULTS,
            &[QueryOption::Limit(10), QueryOption::Order("user_ptime".into())],
        );
        let b = compose(
            DEFAULTS,
            &[QueryOption::Order("user_ptime".into()), QueryOption::Limit(10)],
        );
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_strings_keep_default() {
        let params = compose(
            &[("o", "file_name")],
            &[QueryOption::Order(String::new()), QueryOption::Order("  ".into())],
        );
        assert_eq!(get(&params, "o"), Some("file_name"));
    }

    #[test]
    fn test_new_keys_are_added() {
        let params = compose(DEFAULTS, &[QueryOption::SearchValue("foo".into())]);
        assert_eq!(get(&params, "search_value"), Some("foo"));
        assert_eq!(params.len(), 4);
    }

    #[test]
    fn test_asc_writes_both_directions() {
        let params = compose(DEFAULTS, &[QueryOption::Asc(Some(false))]);
        assert_eq!(get(&params, "asc"), Some("0"));

        let params = compose(DEFAULTS, &[QueryOption::Asc(None)]);
        assert_eq!(get(&params, "asc"), Some("1"));
    }
}
