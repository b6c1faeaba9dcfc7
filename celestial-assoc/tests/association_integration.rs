use celestial_assoc::{
    best_first, AssocError, AssociationEngine, AssociationQuery, CatalogRecord, CatalogRegistry,
    CoordinateFrame, ErrorInput, ErrorModel, InvalidArgumentKind, SkyPosition,
};

fn eq(ra: f64, dec: f64) -> SkyPosition {
    SkyPosition::equatorial(ra, dec).unwrap()
}

/// Deterministic scatter of `n` sources in a ring around `(ra, dec)`.
fn ring(prefix: &str, ra: f64, dec: f64, inner: f64, outer: f64, n: usize) -> Vec<CatalogRecord> {
    (0..n)
        .map(|i| {
            let frac = i as f64 / n as f64;
            let r = inner + (outer - inner) * ((i * 7) % n) as f64 / n as f64;
            let theta = frac * std::f64::consts::TAU;
            CatalogRecord::equatorial(
                format!("{}{}", prefix, i),
                ra + r * theta.cos(),
                dec + r * theta.sin(),
            )
        })
        .collect()
}

fn blazar_registry() -> CatalogRegistry {
    let mut records = vec![
        CatalogRecord::equatorial("CRATES J2253+1608", 343.4906, 16.1482),
        CatalogRecord::equatorial("CRATES J2254+1613", 343.62, 16.22),
    ];
    records.extend(ring("bg", 343.495, 16.149, 0.5, 3.5, 40));

    let mut registry = CatalogRegistry::new();
    registry.register_catalog("obj-blazar", records).unwrap();
    registry
}

// --- Reference scenarios ---

#[test]
fn coincident_entry_has_probability_near_one() {
    let mut registry = CatalogRegistry::new();
    registry
        .register_catalog("cat", vec![CatalogRecord::equatorial("only", 83.633, -5.375)])
        .unwrap();
    let engine = AssociationEngine::new(&registry);

    let results = engine
        .query(&eq(83.633, -5.375), ErrorModel::circular(0.01).unwrap(), "cat", 0.5, 0.0)
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].entry.id, "only");
    assert!(results[0].probability > 0.999, "p = {}", results[0].probability);
}

#[test]
fn distant_entry_is_filtered_out() {
    let mut registry = CatalogRegistry::new();
    registry
        .register_catalog("cat", vec![CatalogRecord::equatorial("far", 93.633, -5.375)])
        .unwrap();
    let engine = AssociationEngine::new(&registry);

    let results = engine
        .query(&eq(83.633, -5.375), ErrorModel::circular(0.01).unwrap(), "cat", 0.5, 0.0)
        .unwrap();
    assert!(results.is_empty());
}

#[test]
fn four_element_error_is_rejected() {
    let err = ErrorModel::try_from(ErrorInput::from([0.1, 0.1, 0.1, 0.1])).unwrap_err();
    assert_eq!(err.invalid_kind(), Some(InvalidArgumentKind::ErrorShape));
}

#[test]
fn unregistered_catalog_is_rejected() {
    let registry = blazar_registry();
    let engine = AssociationEngine::new(&registry);
    let err = engine
        .query(&eq(0.0, 0.0), ErrorModel::circular(0.1).unwrap(), "obj-agn", 0.5, 0.5)
        .unwrap_err();
    assert!(matches!(err, AssocError::UnknownCatalog { ref name } if name == "obj-agn"));
}

#[test]
fn sparse_region_beats_dense_region() {
    let dense_center = (100.0, 0.0);
    let sparse_center = (250.0, 0.0);

    let mut records = vec![
        CatalogRecord::equatorial("dense-target", 100.0, 0.05),
        CatalogRecord::equatorial("sparse-target", 250.0, 0.05),
    ];
    // Outside the 5-sigma candidate cut but inside the 4° density circle.
    records.extend(ring("crowd", dense_center.0, dense_center.1, 1.0, 3.0, 60));

    let mut registry = CatalogRegistry::new();
    registry.register_catalog("mixed", records).unwrap();
    let engine = AssociationEngine::new(&registry);
    let error = ErrorModel::circular(0.05).unwrap();

    let dense = engine
        .query(&eq(dense_center.0, dense_center.1), error, "mixed", 0.5, 0.0)
        .unwrap();
    let sparse = engine
        .query(&eq(sparse_center.0, sparse_center.1), error, "mixed", 0.5, 0.0)
        .unwrap();

    assert_eq!(dense.len(), 1);
    assert_eq!(sparse.len(), 1);
    assert_eq!(dense[0].entry.id, "dense-target");
    assert_eq!(sparse[0].entry.id, "sparse-target");
    assert!((dense[0].separation_deg - sparse[0].separation_deg).abs() < 1e-12);
    assert!(sparse[0].probability > dense[0].probability);
}

// --- Properties ---

#[test]
fn identical_queries_return_identical_results() {
    let registry = blazar_registry();
    let engine = AssociationEngine::new(&registry);
    let query = AssociationQuery::new(
        eq(343.495, 16.149),
        ErrorModel::elliptical(0.05, 0.02, 30.0).unwrap(),
        "obj-blazar",
    )
    .with_prior(0.33)
    .with_threshold(0.0);

    let first = engine.run(&query).unwrap();
    let second = engine.run(&query).unwrap();
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn probabilities_stay_in_unit_interval() {
    let registry = blazar_registry();
    let engine = AssociationEngine::new(&registry);

    for &radius in &[0.001, 0.01, 0.1, 0.5] {
        for &prior in &[1e-6, 0.1, 0.5, 0.9, 1.0 - 1e-6] {
            let results = engine
                .query(
                    &eq(343.5, 16.15),
                    ErrorModel::circular(radius).unwrap(),
                    "obj-blazar",
                    prior,
                    0.0,
                )
                .unwrap();
            for r in &results {
                assert!(
                    (0.0..=1.0).contains(&r.probability),
                    "r={} prior={} p={}",
                    radius,
                    prior,
                    r.probability
                );
            }
        }
    }
}

#[test]
fn prior_drives_posterior_to_its_limits() {
    let registry = blazar_registry();
    let engine = AssociationEngine::new(&registry);
    let error = ErrorModel::circular(0.01).unwrap();
    let position = eq(343.4906, 16.1482);

    let low = engine
        .query(&position, error, "obj-blazar", 1e-12, 0.0)
        .unwrap();
    assert!(low.iter().all(|r| r.probability < 1e-3));

    let high = engine
        .query(&position, error, "obj-blazar", 1.0 - 1e-12, 0.0)
        .unwrap();
    let best = high.last().unwrap();
    assert_eq!(best.entry.id, "CRATES J2253+1608");
    assert!(best.probability > 1.0 - 1e-9);
}

#[test]
fn threshold_and_order_contract() {
    let registry = blazar_registry();
    let engine = AssociationEngine::new(&registry);
    let query = AssociationQuery::new(
        eq(343.55, 16.18),
        ErrorModel::circular(0.05).unwrap(),
        "obj-blazar",
    )
    .with_threshold(0.0);

    let results = engine.run(&query).unwrap();
    assert_eq!(results.len(), 2);
    assert!(results[0].probability <= results[1].probability);

    let best = best_first(results.clone());
    assert_eq!(best[0], results[1]);
    assert_eq!(best[1], results[0]);

    let cut = engine
        .run(&query.clone().with_threshold(results[0].probability))
        .unwrap();
    assert_eq!(cut.len(), 1);
    assert_eq!(cut[0], results[1]);
}

#[test]
fn select_circle_matches_brute_force_near_pole_and_seam() {
    let mut records = ring("pole", 0.0, 88.0, 0.0, 1.9, 50);
    records.extend(ring("seam", 0.3, -20.0, 0.1, 2.0, 50));
    records.push(CatalogRecord::equatorial("cap", 180.0, 89.9));

    let mut registry = CatalogRegistry::new();
    registry.register_catalog("edges", records).unwrap();
    let catalog = registry.catalog("edges").unwrap();

    for &(ra, dec, radius) in &[(0.0, 88.0, 2.5), (180.0, 89.5, 1.0), (359.8, -20.0, 1.5)] {
        let center = eq(ra, dec);
        let selected = catalog.select_circle(&center, radius).unwrap();
        let coarse = catalog.coarse_candidates(&center, radius).unwrap();
        let brute: Vec<_> = catalog
            .iter()
            .filter(|e| center.separation_deg(&e.position) <= radius)
            .collect();

        assert_eq!(selected, brute, "center ({}, {}) r={}", ra, dec, radius);
        assert!(selected.len() <= coarse.len());
        for entry in &selected {
            assert!(coarse.contains(entry));
            assert!(center.separation_deg(&entry.position) <= radius + 1e-9);
        }
    }
}

#[test]
fn local_density_is_non_negative() {
    let registry = blazar_registry();
    let catalog = registry.catalog("obj-blazar").unwrap();
    for &(ra, dec) in &[(343.5, 16.1), (0.0, 0.0), (100.0, -89.0)] {
        for &radius in &[0.1, 1.0, 4.0, 30.0] {
            let density = catalog.local_density(&eq(ra, dec), radius).unwrap();
            assert!(density >= 0.0);
        }
    }
}

// --- Frames and registry ---

#[test]
fn galactic_query_finds_equatorial_counterpart() {
    let registry = blazar_registry();
    let engine = AssociationEngine::new(&registry);
    let error = ErrorModel::circular(0.016 / 2.45).unwrap();

    let equatorial = eq(343.495, 16.149);
    let galactic = equatorial.to_frame(CoordinateFrame::Galactic);

    let from_eq = engine
        .query(&equatorial, error, "obj-blazar", 0.33, 0.8)
        .unwrap();
    let from_gal = engine
        .query(&galactic, error, "obj-blazar", 0.33, 0.8)
        .unwrap();

    assert_eq!(from_eq.len(), 1);
    assert_eq!(from_gal.len(), 1);
    assert_eq!(from_eq[0].entry.id, from_gal[0].entry.id);
    assert!((from_eq[0].probability - from_gal[0].probability).abs() < 1e-9);
}

#[test]
fn legacy_triple_matches_equivalent_circle() {
    let registry = blazar_registry();
    let engine = AssociationEngine::new(&registry);
    let sigma = 0.016 / 2.45;

    let circle = ErrorModel::try_from(ErrorInput::from(sigma)).unwrap();
    let triple = ErrorModel::try_from(ErrorInput::from((sigma, sigma, 0.0))).unwrap();

    let a = engine
        .query(&eq(343.495, 16.149), circle, "obj-blazar", 0.33, 0.8)
        .unwrap();
    let b = engine
        .query(&eq(343.495, 16.149), triple, "obj-blazar", 0.33, 0.8)
        .unwrap();
    assert_eq!(a.len(), 1);
    assert_eq!(a[0].entry, b[0].entry);
    assert!((a[0].probability - b[0].probability).abs() < 1e-15);
}

#[test]
fn lazy_catalog_is_queryable() {
    let mut registry = CatalogRegistry::new();
    registry
        .register_lazy("lazy-agn", || {
            Ok(vec![CatalogRecord::galactic("gc-source", 0.0, 0.0)])
        })
        .unwrap();
    assert!(!registry.is_loaded("lazy-agn"));

    let engine = AssociationEngine::new(&registry);
    let gc = SkyPosition::galactic(0.0, 0.0)
        .unwrap()
        .to_frame(CoordinateFrame::Equatorial);
    let results = engine
        .query(&gc, ErrorModel::circular(0.05).unwrap(), "lazy-agn", 0.5, 0.5)
        .unwrap();

    assert!(registry.is_loaded("lazy-agn"));
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].entry.catalog_name, "lazy-agn");
}

#[test]
fn concurrent_queries_share_one_registry() {
    let registry = blazar_registry();
    let engine = AssociationEngine::new(&registry);
    let query = AssociationQuery::new(
        eq(343.495, 16.149),
        ErrorModel::circular(0.02).unwrap(),
        "obj-blazar",
    );
    let expected = engine.run(&query).unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| engine.run(&query).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
