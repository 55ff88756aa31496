//! Comprehensive tests for PaginationConfig resolution
//!
//! Tests cover defaults, builder overrides, deserialization from
//! configuration files, and every construction-time rejection.

use pagekit_domain::config::defaults::{
    DEFAULT_LIMIT, DEFAULT_MAX_LIMIT, DEFAULT_MAX_SORT_FIELDS, DEFAULT_MIN_LIMIT,
    DEFAULT_SORT_FIELD,
};
use pagekit_domain::{
    DefaultSort, DomainError, PaginationConfig, PaginationPolicy, SortDirection, SortOptions,
};
use std::sync::Arc;

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn test_empty_config_resolves_to_defaults() {
    let policy = PaginationConfig::new().build().unwrap();

    assert!(policy.allowed_sort_fields().is_empty());
    assert_eq!(policy.default_sort(), &DefaultSort::Field(DEFAULT_SORT_FIELD.into()));
    assert_eq!(policy.default_order(), SortDirection::Desc);
    assert_eq!(policy.default_limit(), DEFAULT_LIMIT);
    assert_eq!(policy.min_limit(), DEFAULT_MIN_LIMIT);
    assert_eq!(policy.max_limit(), DEFAULT_MAX_LIMIT);
    assert_eq!(policy.max_sort_fields(), DEFAULT_MAX_SORT_FIELDS);
    assert_eq!(policy.search_max_length(), None);
}

#[test]
fn test_builder_overrides() {
    let policy = PaginationPolicy::builder()
        .with_allowed_sort_fields(["name", "price"])
        .with_default_sort("price")
        .with_default_order(SortDirection::Asc)
        .with_default_limit(25)
        .with_min_limit(5)
        .with_max_limit(50)
        .with_max_sort_fields(2)
        .with_search_max_length(64)
        .build()
        .unwrap();

    assert_eq!(policy.allowed_sort_fields().len(), 2);
    assert_eq!(policy.default_sort_field(), "price");
    assert_eq!(policy.default_order(), SortDirection::Asc);
    assert_eq!(policy.default_limit(), 25);
    assert_eq!(policy.min_limit(), 5);
    assert_eq!(policy.max_limit(), 50);
    assert_eq!(policy.max_sort_fields(), 2);
    assert_eq!(policy.search_max_length(), Some(64));
}

#[test]
fn test_allowed_fields_are_trimmed_and_deduplicated() {
    let policy = PaginationConfig::new()
        .with_allowed_sort_fields([" createdAt ", "createdAt", "", "name"])
        .build()
        .unwrap();

    let fields: Vec<&str> = policy.allowed_sort_fields().iter().map(String::as_str).collect();
    assert_eq!(fields, vec!["createdAt", "name"]);
}

#[test]
fn test_policy_shared_across_threads() {
    let policy = Arc::new(PaginationConfig::new().with_max_limit(20).build().unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let policy = Arc::clone(&policy);
            std::thread::spawn(move || policy.max_limit())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 20);
    }
}

// ============================================================================
// Rejections
// ============================================================================

#[test]
fn test_rejections_are_invalid_config() {
    let cases = [
        PaginationConfig::new().with_min_limit(0),
        PaginationConfig::new().with_min_limit(10).with_max_limit(5),
        PaginationConfig::new().with_default_limit(0),
        PaginationConfig::new().with_default_limit(101),
        PaginationConfig::new().with_max_sort_fields(0),
        PaginationConfig::new().with_search_max_length(0),
        PaginationConfig::new().with_default_sort("  "),
        PaginationConfig::new().with_default_sort_options(SortOptions::new()),
        PaginationConfig::new()
            .with_allowed_sort_fields(["name"])
            .with_default_sort("price"),
        PaginationConfig::new()
            .with_allowed_sort_fields(["name"])
            .with_default_sort_options(SortOptions::from_colon_list("name:asc,price:desc")),
    ];

    for config in cases {
        let debug = format!("{config:?}");
        let err = config.build().unwrap_err();
        assert!(matches!(err, DomainError::InvalidConfig(_)), "{debug}");
    }
}

#[test]
fn test_multi_default_within_allow_list_accepted() {
    let policy = PaginationConfig::new()
        .with_allowed_sort_fields(["name", "price"])
        .with_default_sort_options(SortOptions::from_colon_list("price:asc,name:desc"))
        .build()
        .unwrap();

    assert_eq!(
        policy.fallback_sort(Some(SortDirection::Desc)),
        SortOptions::from_colon_list("price:asc,name:desc")
    );
}

// ============================================================================
// Deserialization
// ============================================================================

#[test]
fn test_deserialize_full_config() {
    let config: PaginationConfig = serde_json::from_value(serde_json::json!({
        "allowedSortFields": ["name", "price", "createdAt"],
        "defaultSort": "name",
        "defaultOrder": "ASC",
        "defaultLimit": 20,
        "minLimit": 5,
        "maxLimit": 50,
        "maxSortFields": 2,
        "searchMaxLength": 100
    }))
    .unwrap();
    let policy = config.build().unwrap();

    assert_eq!(policy.default_sort_field(), "name");
    assert_eq!(policy.default_order(), SortDirection::Asc);
    assert_eq!(policy.default_limit(), 20);
    assert_eq!(policy.max_sort_fields(), 2);
    assert_eq!(policy.search_max_length(), Some(100));
}

#[test]
fn test_deserialize_invalid_direction_fails() {
    let result = serde_json::from_value::<PaginationConfig>(serde_json::json!({
        "defaultOrder": "sideways"
    }));
    assert!(result.is_err());
}

#[test]
fn test_deserialize_object_default_sort_keeps_order() {
    let config: PaginationConfig = serde_json::from_str(
        r#"{"defaultSort": {"zeta": "asc", "alpha": "desc", "mid": "asc", "extra": "desc"}}"#,
    )
    .unwrap();
    let policy = config.build().unwrap();

    // Truncated to the default cap of three keys, in declared order
    assert_eq!(
        policy.fallback_sort(None).to_string(),
        "zeta:asc,alpha:desc,mid:asc"
    );
}
