use crate::infra::demo_provider;
use bank_analytics::analytics::segmentation::DEFAULT_CLUSTER_COUNT;
use bank_analytics::analytics::{AnalyticsError, AnalyticsService, DataProvider};
use bank_analytics::error::AppError;
use clap::Args;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Number of behavioral segments to build (defaults to 5)
    #[arg(long)]
    pub(crate) clusters: Option<usize>,
    /// Skip the per-client loan recommendations
    #[arg(long)]
    pub(crate) skip_recommendations: bool,
}

/// Score and segment the seeded demo portfolio on stdout.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let provider = demo_provider();
    let client_ids = provider.client_ids().map_err(AnalyticsError::from)?;
    let service = AnalyticsService::new(Arc::new(provider));

    println!("Client analytics demo ({} clients)", client_ids.len());
    println!(
        "{:<8} {:>12} {:>8} {:>10} {:>8} {:>10} {:>8}",
        "client", "balance", "txns", "credit", "churn", "value", "band"
    );

    for client_id in &client_ids {
        let features = service.client_features(*client_id)?;
        let credit = service.score_credit(*client_id)?;
        let churn = service.score_churn(*client_id)?;
        let value = service.score_value(*client_id)?;

        println!(
            "{:<8} {:>12.2} {:>8} {:>10} {:>8.2} {:>10.2} {:>8}",
            client_id,
            features.balance,
            features.transaction_count,
            credit.score as i64,
            churn.score,
            value.score,
            value.band
        );
    }

    if !args.skip_recommendations {
        println!("\nLoan recommendations");
        for client_id in &client_ids {
            let recommendations = service.recommend_loans(*client_id)?;
            if recommendations.is_empty() {
                println!("  client {client_id}: none");
                continue;
            }
            for rec in recommendations {
                println!(
                    "  client {client_id}: {} up to {:.0} ({} rate, {}, confidence {:.1})",
                    rec.product.label(),
                    rec.max_amount,
                    rec.rate_tier.label(),
                    rec.term,
                    rec.confidence
                );
            }
        }
    }

    let k = args.clusters.unwrap_or(DEFAULT_CLUSTER_COUNT);
    let outcome = service.segment_population(k)?;
    println!("\nBehavioral segments (k = {k})");
    for profile in &outcome.profiles {
        println!(
            "  segment {}: {} clients, avg balance {:.0} ({}), activity {}, success rate {}",
            profile.cluster,
            profile.size,
            profile.mean_balance,
            profile.characteristics.balance_level.label(),
            profile.characteristics.activity_level.label(),
            profile.characteristics.success_rate.label()
        );
    }

    Ok(())
}
