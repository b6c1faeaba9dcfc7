use celestial_assoc::{
    best_first, AssociationEngine, AssociationQuery, CatalogRecord, CatalogRegistry, ErrorInput,
    ErrorModel, SkyPosition,
};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let mut registry = CatalogRegistry::new();
    registry.register_catalog(
        "obj-blazar-crates",
        vec![
            CatalogRecord::equatorial("CRATES J2253+1608", 343.4906, 16.1482),
            CatalogRecord::equatorial("CRATES J2254+1613", 343.62, 16.22),
            CatalogRecord::equatorial("CRATES J2250+1419", 342.62, 14.33),
        ],
    )?;
    registry.register_lazy("obj-pulsar", || {
        Ok(vec![
            CatalogRecord::galactic("PSR J0534+2200", 184.5575, -5.7843),
            CatalogRecord::galactic("PSR J0835-4510", 263.5520, -2.7873),
        ])
    })?;

    let engine = AssociationEngine::new(&registry);

    // 3C 454.3, r68 of 0.016° converted to a 1-sigma radius.
    let position = SkyPosition::equatorial(343.495, 16.149)?;
    let sigma = 0.016 / 2.45;

    for input in [ErrorInput::from(sigma), ErrorInput::from((sigma, sigma, 0.0))] {
        let error = ErrorModel::try_from(input)?;
        let query = AssociationQuery::new(position, error, "obj-blazar-crates")
            .with_prior(0.33)
            .with_threshold(0.8);

        println!("\n{} with {:?}:", position, error);
        for result in best_first(engine.run(&query)?) {
            println!(
                "  p={:.6}  sep={:.4}°  {}",
                result.probability, result.separation_deg, result.entry
            );
        }
    }

    let query =
        AssociationQuery::new(position, ErrorModel::circular(0.05)?, "").with_threshold(0.0);
    for (catalog, results) in engine.query_all(&query)? {
        println!("\n{}: {} association(s)", catalog, results.len());
    }

    match ErrorModel::try_from(ErrorInput::from([0.5; 4])) {
        Ok(_) => println!("\nunexpectedly accepted a 4-element error"),
        Err(e) => println!("\nrejected: {}", e),
    }

    Ok(())
}
