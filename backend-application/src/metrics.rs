use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    kill_reports: AtomicU64,
    death_reports: AtomicU64,
    report_errors: AtomicU64,
    enrichment_misses: AtomicU64,
    keys_issued: AtomicU64,
}

impl Metrics {
    pub fn record_kill_report(&self) {
        self.kill_reports.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_death_report(&self) {
        self.death_reports.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_report_error(&self) {
        self.report_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_enrichment_miss(&self) {
        self.enrichment_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_key_issued(&self) {
        self.keys_issued.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let kills = self.kill_reports.load(Ordering::Relaxed);
        let deaths = self.death_reports.load(Ordering::Relaxed);
        let errors = self.report_errors.load(Ordering::Relaxed);
        let misses = self.enrichment_misses.load(Ordering::Relaxed);
        let keys = self.keys_issued.load(Ordering::Relaxed);

        format!(
            "# TYPE killfeed_kill_reports_total counter\n\
killfeed_kill_reports_total {}\n\
# TYPE killfeed_death_reports_total counter\n\
killfeed_death_reports_total {}\n\
# TYPE killfeed_report_errors_total counter\n\
killfeed_report_errors_total {}\n\
# TYPE killfeed_enrichment_misses_total counter\n\
killfeed_enrichment_misses_total {}\n\
# TYPE killfeed_keys_issued_total counter\n\
killfeed_keys_issued_total {}\n",
            kills, deaths, errors, misses, keys
        )
    }
}
