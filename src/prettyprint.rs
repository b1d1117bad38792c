use tracing::{Event, Subscriber};
use tracing_subscriber::{
    fmt::{
        self,
        format::{Format, FormatEvent, FormatFields, Full, Writer},
        time::SystemTime,
        FmtContext,
    },
    registry::LookupSpan,
};

enum Inner {
    Terminal(Format<Full, ()>),
    File(Format<Full, SystemTime>),
}

/// Event formatter that indents every event under the spans it was recorded in, so the steps of a
/// run (authorize, read, append) read as a tree.
pub struct PrettyFormatter {
    inner: Inner,
}

impl PrettyFormatter {
    /// Terminal output gets colors and no timestamp; file output gets timestamps and plain text.
    pub fn new(ansi: bool) -> Self {
        let format = fmt::format()
            .with_ansi(ansi)
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_level(true)
            .with_source_location(false);

        let inner = if ansi {
            Inner::Terminal(format.without_time())
        } else {
            Inner::File(format)
        };

        Self { inner }
    }
}

impl<S, N> FormatEvent<S, N> for PrettyFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'writer> FormatFields<'writer> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let depth = ctx.event_scope().map(|scope| scope.count()).unwrap_or(0);

        for _ in 1..depth {
            write!(writer, "  ")?;
        }
        if depth > 0 {
            write!(writer, "└─ ")?;
        }

        match &self.inner {
            Inner::Terminal(format) => format.format_event(ctx, writer, event),
            Inner::File(format) => format.format_event(ctx, writer, event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::layer::SubscriberExt;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn capture(ansi: bool) -> String {
        let buffer = Buffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::registry().with(
            tracing_subscriber::fmt::layer()
                .event_format(PrettyFormatter::new(ansi))
                .with_writer(move || writer.clone())
                .with_ansi(ansi),
        );

        tracing::subscriber::with_default(subscriber, || {
            let span = tracing::info_span!("run");
            let _enter = span.enter();
            tracing::info!("Row added");
        });

        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_nested_event_is_indented() {
        let output = capture(false);
        assert!(output.contains("└─ "));
        assert!(output.contains("Row added"));
    }

    #[test]
    fn test_file_output_is_plain() {
        assert!(!capture(false).contains('\u{1b}'));
    }
}
