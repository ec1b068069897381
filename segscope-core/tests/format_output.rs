use segscope_core::format;

#[test]
fn small_sizes_print_exact_bytes() {
    assert_eq!(format::size(0), "0 bytes");
    assert_eq!(format::size(312), "312 bytes");
    assert_eq!(format::size(8191), "8191 bytes");
}

#[test]
fn larger_sizes_floor_to_tenths() {
    assert_eq!(format::size(8192), "8 KB");
    assert_eq!(format::size(15_872), "15.5 KB");
    assert_eq!(format::size(1_048_576), "1 MB");
    assert_eq!(format::size(1_572_864), "1.5 MB");
    assert_eq!(format::size(1_258_291), "1.2 MB");
    assert_eq!(format::size(1 << 30), "1 GB");
    assert_eq!(format::size((1 << 30) + (1 << 29)), "1.5 GB");
}

#[test]
fn age_breaks_down_days_hours_minutes_seconds() {
    assert_eq!(format::age(0), "0d0h0m0s");
    assert_eq!(format::age(999), "0d0h0m0s");
    assert_eq!(format::age(61_000), "0d0h1m1s");
    assert_eq!(format::age(90_061_000), "1d1h1m1s");
}

#[test]
fn negative_age_clamps_to_zero() {
    assert_eq!(format::age(-5_000), "0d0h0m0s");
}

#[test]
fn dates_render_rfc3339_utc() {
    assert_eq!(format::date(0), "1970-01-01T00:00:00+00:00");
    assert_eq!(format::date(1_476_792_800_724), "2016-10-18T12:13:20.724+00:00");
}

#[test]
fn out_of_range_date_gets_a_placeholder() {
    assert!(format::date(i64::MAX).starts_with("invalid timestamp"));
}
