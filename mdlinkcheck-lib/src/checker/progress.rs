use indicatif::{ProgressBar as Bar, ProgressStyle};
use std::sync::LazyLock;

#[derive(Clone)]
struct ProgressConfig {
    template: &'static str,
    progress_chars: &'static str,
}

const CONFIG: ProgressConfig = ProgressConfig {
    template: "{pos}/{len:.238} {bar:.162/238} {wide_msg}",
    progress_chars: "━ ━",
};

static STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::with_template(CONFIG.template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars(CONFIG.progress_chars)
});

/// Progress of the links of one document, drawn on stderr
pub(crate) struct Progress {
    bar: Option<Bar>,
}

impl Progress {
    pub(crate) fn new(show: bool, length: usize) -> Self {
        let bar = show.then(|| {
            let bar = Bar::new(length as u64).with_style(STYLE.clone());
            bar.set_message("Checking links");
            bar
        });
        Self { bar }
    }

    pub(crate) fn update(&self, link: &str) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
            bar.set_message(link.to_string());
        }
    }

    pub(crate) fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}
