//! Tests for batch progress reporting

#[cfg(test)]
mod tests {
    use spritegrid::io::progress::ProgressReporter;
    use std::path::Path;

    // Tests a barless reporter accepts every call
    #[test]
    fn test_inactive_reporter() {
        let reporter = ProgressReporter::new(1, false);

        reporter.start_file(Path::new("only.png"));
        reporter.report("only.png: no grid detected");
        reporter.complete_file();
        reporter.finish();
    }

    // Tests a quiet batch run never creates a bar
    #[test]
    fn test_quiet_batch() {
        let reporter = ProgressReporter::new(3, false);

        for name in ["a.png", "b.png", "c.png"] {
            reporter.start_file(Path::new(name));
            reporter.report(&format!("{name}: no grid detected"));
            reporter.complete_file();
        }
        reporter.finish();
    }
}
