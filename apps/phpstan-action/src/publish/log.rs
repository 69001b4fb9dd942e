//! GitHub Actions workflow commands (`::error file=...,line=...::message`).

use super::{PublishError, Publisher};
use crate::models::Annotation;
use std::io::Write;

/// Writes one workflow command per annotation.
pub struct LogDirectivePublisher<W: Write> {
    out: W,
}

impl<W: Write> LogDirectivePublisher<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Publisher for LogDirectivePublisher<W> {
    fn publish(&mut self, annotations: &[Annotation]) -> Result<(), PublishError> {
        for a in annotations {
            writeln!(self.out, "{}", render_directive(a)).map_err(PublishError::Write)?;
        }
        self.out.flush().map_err(PublishError::Write)
    }
}

/// Render a single-line workflow command. Newlines in the message become
/// `%0A` so one finding never spans lines.
pub fn render_directive(a: &Annotation) -> String {
    format!(
        "::{level} file={path},line={line}::{msg}",
        level = a.level.directive(),
        path = a.path,
        line = a.start_line,
        msg = a.message.replace('\n', "%0A")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_render_directive() {
        let a = Annotation::single_line("src/a.php".into(), 10, "undefined variable".into());
        assert_eq!(
            render_directive(&a),
            "::error file=src/a.php,line=10::undefined variable"
        );
    }

    #[test]
    fn test_newlines_are_percent_encoded() {
        let a = Annotation::single_line("b.php".into(), 3, "a\nb\nc".into());
        assert_eq!(render_directive(&a), "::error file=b.php,line=3::a%0Ab%0Ac");
    }

    #[test]
    fn test_publish_writes_one_line_per_annotation_in_order() {
        let anns = vec![
            Annotation::single_line("a.php".into(), 1, "first".into()),
            Annotation::single_line("b.php".into(), 0, "second\nline".into()),
        ];
        let mut p = LogDirectivePublisher::new(Vec::new());
        p.publish(&anns).unwrap();
        let out = String::from_utf8(p.into_inner()).unwrap();
        assert_eq!(
            out,
            "::error file=a.php,line=1::first\n::error file=b.php,line=0::second%0Aline\n"
        );
    }

    #[test]
    fn test_publish_nothing_for_empty_sequence() {
        let mut p = LogDirectivePublisher::new(Vec::new());
        p.publish(&[]).unwrap();
        assert!(p.into_inner().is_empty());
    }

    #[test]
    fn test_write_failure_aborts() {
        struct Full(usize);
        impl Write for Full {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                if self.0 == 0 {
                    return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
                }
                self.0 -= 1;
                Ok(buf.len())
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }
        let anns = vec![Annotation::single_line("a.php".into(), 1, "x".into()); 3];
        let mut p = LogDirectivePublisher::new(Full(1));
        assert!(matches!(p.publish(&anns), Err(PublishError::Write(_))));
    }
}
