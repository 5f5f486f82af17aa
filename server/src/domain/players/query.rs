//! Paging and ordering parameters

use crate::data::types::{PageRequest, PlayerSort};

use super::coercion::parse_integer;
use super::error::PlayerError;
use super::filter::{FilterParams, ORDER_KEY, PAGE_NUMBER_KEY, PAGE_SIZE_KEY};

/// Reads `pageSize`, `pageNumber` and `order`, falling back to page 0 of
/// size 3 ordered by id.
pub fn page_request(params: &FilterParams) -> Result<PageRequest, PlayerError> {
    let defaults = PageRequest::default();

    let page_size = match params.get(PAGE_SIZE_KEY) {
        Some(raw) => bounded(PAGE_SIZE_KEY, raw, 1)?,
        None => defaults.page_size,
    };

    let page_number = match params.get(PAGE_NUMBER_KEY) {
        Some(raw) => bounded(PAGE_NUMBER_KEY, raw, 0)?,
        None => defaults.page_number,
    };

    let sort = match params.get(ORDER_KEY) {
        Some(raw) => raw
            .parse::<PlayerSort>()
            .map_err(|_| PlayerError::UnknownSortField {
                value: raw.to_string(),
            })?,
        None => defaults.sort,
    };

    Ok(PageRequest {
        page_number,
        page_size,
        sort,
    })
}

fn bounded(key: &'static str, raw: &str, min: u32) -> Result<u32, PlayerError> {
    let value = parse_integer(key, raw)?;
    u32::try_from(value)
        .ok()
        .filter(|v| *v >= min)
        .ok_or_else(|| PlayerError::invalid_value(key, raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> FilterParams {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_defaults() {
        assert_eq!(
            page_request(&FilterParams::new()).unwrap(),
            PageRequest {
                page_number: 0,
                page_size: 3,
                sort: PlayerSort::Id
            }
        );
    }

    #[test]
    fn test_reads_all_keys() {
        let page = page_request(&params(&[
            ("order", "EXPERIENCE"),
            ("pageNumber", "2"),
            ("pageSize", "10"),
            ("name", "ignored"),
        ]))
        .unwrap();
        assert_eq!(page.sort, PlayerSort::Experience);
        assert_eq!(page.page_number, 2);
        assert_eq!(page.page_size, 10);
    }

    #[test]
    fn test_null_sentinel_means_default() {
        let page = page_request(&params(&[("order", "null"), ("pageSize", "null")])).unwrap();
        assert_eq!(page, PageRequest::default());
    }

    #[test]
    fn test_rejects_bad_paging() {
        for (key, raw) in [
            ("pageSize", "0"),
            ("pageSize", "-1"),
            ("pageSize", "three"),
            ("pageNumber", "-1"),
            ("pageNumber", "1.5"),
        ] {
            let err = page_request(&params(&[(key, raw)])).unwrap_err();
            assert!(
                matches!(err, PlayerError::InvalidValueFormat { .. }),
                "{key}={raw}"
            );
        }
    }

    #[test]
    fn test_rejects_unknown_order() {
        let err = page_request(&params(&[("order", "TITLE")])).unwrap_err();
        assert!(matches!(err, PlayerError::UnknownSortField { value } if value == "TITLE"));
    }
}
