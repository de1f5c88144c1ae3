use terravalet_recon::{run, AddressSet, MatchOptions, ReconError};

fn set(addresses: &[&str]) -> AddressSet {
    AddressSet::from_addresses(addresses.iter().copied()).unwrap()
}

// -------------------------------------------------------------------------
// Exact matching
// -------------------------------------------------------------------------

#[test]
fn module_extraction_is_fully_exact() {
    let create = set(&[
        "aws_instance.docker",
        r#"aws_autoscaling_group.workers["linux"]"#,
        r#"module.workers["windows-vs2019"].aws_autoscaling_schedule.night_mode"#,
    ]);
    let destroy = set(&[
        "module.ci.aws_instance.docker",
        r#"module.ci.aws_autoscaling_group.workers["linux"]"#,
        r#"module.ci.module.workers["windows-vs2019"].aws_autoscaling_schedule.night_mode"#,
    ]);

    let result = run(create, destroy, &MatchOptions::exact_only()).unwrap();

    assert!(result.is_complete());
    assert_eq!(result.summary.exact, 3);
    assert_eq!(result.summary.fuzzy, 0);
    assert_eq!(
        result.table.up()["module.ci.aws_instance.docker"],
        "aws_instance.docker"
    );
    assert_eq!(
        result.table.down()["aws_instance.docker"],
        "module.ci.aws_instance.docker"
    );
}

#[test]
fn unmatched_addresses_surface_as_residue() {
    let create = set(&["a.b", r#"aws_route53_record.private["artifactory"]"#]);
    let destroy = set(&["b", "aws_route53_record.artifactory_private"]);

    let result = run(create, destroy, &MatchOptions::exact_only()).unwrap();

    assert!(!result.is_complete());
    assert_eq!(result.table.len(), 1);
    assert_eq!(
        result.residue.to_string(),
        "unmatched create:\n  aws_route53_record.private[\"artifactory\"]\n\
         unmatched destroy:\n  aws_route53_record.artifactory_private"
    );
    assert_eq!(result.summary.unmatched_create, 1);
    assert_eq!(result.summary.unmatched_destroy, 1);
}

// -------------------------------------------------------------------------
// Fuzzy matching
// -------------------------------------------------------------------------

#[test]
fn route53_records_pair_up_fuzzily() {
    let create = set(&[
        r#"aws_route53_record.loopback["artifactory"]"#,
        r#"aws_route53_record.private["artifactory"]"#,
        r#"aws_route53_record.public["artifactory"]"#,
    ]);
    let destroy = set(&[
        "aws_route53_record.artifactory",
        "aws_route53_record.artifactory_loopback",
        "aws_route53_record.artifactory_private",
    ]);

    let result = run(create, destroy, &MatchOptions::with_fuzzy()).unwrap();

    assert!(result.is_complete());
    assert_eq!(result.summary.fuzzy, 3);
    let up = result.table.up();
    assert_eq!(
        up["aws_route53_record.artifactory_loopback"],
        r#"aws_route53_record.loopback["artifactory"]"#
    );
    assert_eq!(
        up["aws_route53_record.artifactory_private"],
        r#"aws_route53_record.private["artifactory"]"#
    );
    assert_eq!(
        up["aws_route53_record.artifactory"],
        r#"aws_route53_record.public["artifactory"]"#
    );
}

#[test]
fn exact_and_fuzzy_pairs_end_up_in_one_table() {
    let create = set(&["module.net.aws_vpc.main", r#"foo.loopback["bar"]"#]);
    let destroy = set(&["aws_vpc.main", "foo.bar_loopback"]);

    let result = run(create, destroy, &MatchOptions::with_fuzzy()).unwrap();

    assert!(result.is_complete());
    assert_eq!(result.summary.exact, 1);
    assert_eq!(result.summary.fuzzy, 1);
    assert_eq!(result.table.len(), 2);
    assert_eq!(result.table.up()["aws_vpc.main"], "module.net.aws_vpc.main");
    assert_eq!(
        result.table.up()["foo.bar_loopback"],
        r#"foo.loopback["bar"]"#
    );
}

#[test]
fn ambiguity_is_fatal() {
    let err = run(
        set(&["abcde", "abdecde"]),
        set(&["abdcde", "hfjabd"]),
        &MatchOptions::with_fuzzy(),
    )
    .unwrap_err();

    match &err {
        ReconError::AmbiguousMigration { first, second } => {
            assert_eq!(first, &("abcde".to_string(), "abdcde".to_string()));
            assert_eq!(second, &("abdecde".to_string(), "abdcde".to_string()));
        }
        other => panic!("expected ambiguity, got {other:?}"),
    }
}

// -------------------------------------------------------------------------
// Determinism
// -------------------------------------------------------------------------

#[test]
fn insertion_order_does_not_change_the_outcome() {
    let creates = [
        "m1.b",
        "m2.b",
        r#"foo.loopback["bar"]"#,
        r#"foo.private["bar"]"#,
    ];
    let destroys = ["b", "foo.bar_loopback", "foo.bar_private", "zzz"];

    let forward = run(
        set(&creates),
        set(&destroys),
        &MatchOptions::with_fuzzy(),
    )
    .unwrap();

    let mut rev_creates = creates;
    rev_creates.reverse();
    let mut rev_destroys = destroys;
    rev_destroys.reverse();
    let backward = run(
        set(&rev_creates),
        set(&rev_destroys),
        &MatchOptions::with_fuzzy(),
    )
    .unwrap();

    assert_eq!(forward.table, backward.table);
    assert_eq!(forward.residue, backward.residue);
    assert_eq!(forward.summary, backward.summary);
}

#[test]
fn repeated_runs_are_identical() {
    let first = run(
        set(&["x.a", "x.b", "y.c"]),
        set(&["a", "b", "c_old"]),
        &MatchOptions::with_fuzzy(),
    );
    for _ in 0..10 {
        let again = run(
            set(&["x.a", "x.b", "y.c"]),
            set(&["a", "b", "c_old"]),
            &MatchOptions::with_fuzzy(),
        );
        assert_eq!(
            format!("{first:?}"),
            format!("{again:?}")
        );
    }
}

#[test]
fn table_serializes_sorted() {
    let result = run(
        set(&["m.z", "m.a"]),
        set(&["z", "a"]),
        &MatchOptions::exact_only(),
    )
    .unwrap();
    let pairs: Vec<(String, String)> = result
        .table
        .pairs()
        .map(|p| (p.old, p.new))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("a".to_string(), "m.a".to_string()),
            ("z".to_string(), "m.z".to_string()),
        ]
    );
    let json = serde_json::to_value(&result.residue).unwrap();
    assert_eq!(json["create"].as_array().unwrap().len(), 0);
}
