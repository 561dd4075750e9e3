//! Command-line entry point: load a session from a data directory and print
//! the headline report tables for each claim category.

use std::path::PathBuf;
use std::process::ExitCode;

use claim_insight::report::{FilterSelection, filter_claims, monthly_trend, summarize_by_status};
use claim_insight::{ClaimStatus, Session, SessionConfig};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(base) = std::env::args().nth(1).map(PathBuf::from) else {
        eprintln!("usage: claim-insight <data-dir>");
        return ExitCode::FAILURE;
    };

    let session = Session::load(SessionConfig::from_base_dir(&base));
    let everything = FilterSelection::default();
    let mut pages = 0;

    match session.package_claims() {
        Ok(claims) => {
            pages += 1;
            let filtered = filter_claims(claims, &everything);
            let breakdown = summarize_by_status(&filtered);
            println!(
                "INA-CBGs: {} claims ({} Disetujui, {} Ditolak), billed total {:.0}",
                filtered.len(),
                breakdown.count(ClaimStatus::Approved),
                breakdown.count(ClaimStatus::Rejected),
                breakdown.total("TOTAL_TARIF"),
            );
            for (month, count) in monthly_trend(&filtered) {
                if count > 0 {
                    println!("  {month}: {count}");
                }
            }
        }
        Err(e) => log::error!("{e}"),
    }

    match session.non_package_claims() {
        Ok(claims) => {
            pages += 1;
            let filtered = filter_claims(claims, &everything);
            let breakdown = summarize_by_status(&filtered);
            println!(
                "Non-CBGs: {} claims, billed total {:.0}",
                filtered.len(),
                breakdown.total("tagihan"),
            );
        }
        Err(e) => log::error!("{e}"),
    }

    match session.medicine_claims() {
        Ok(claims) => {
            pages += 1;
            let filtered = filter_claims(claims, &everything);
            let breakdown = summarize_by_status(&filtered);
            println!(
                "Obat: {} claims, billed total {:.0}, approved total {:.0}",
                filtered.len(),
                breakdown.total("BIAYA_TAGIHAN"),
                breakdown.total("biayasetuju"),
            );
        }
        Err(e) => log::error!("{e}"),
    }

    if pages == 0 {
        log::error!("no dataset could be loaded from {}", base.display());
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
