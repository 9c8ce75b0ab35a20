use crate::language::Line;

/// The open path of lines from the enclosing record's level-0 line down to
/// the line most recently seen. The line at depth N is the open line at
/// level N, so the immediate parent of a line at level L sits at depth
/// L - 1 and its grandparent at L - 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ancestry<'i> {
    stack: Vec<Line<'i>>,
}

impl<'i> Ancestry<'i> {
    pub fn new() -> Ancestry<'i> {
        Ancestry { stack: vec![] }
    }

    /// Record a newly seen line: pop everything at its level or deeper,
    /// then push it as the open line at its own level.
    pub fn descend(&mut self, line: &Line<'i>) {
        self.stack
            .truncate(line.level as usize);
        self.stack
            .push(line.clone());
    }

    pub fn depth(&self) -> usize {
        self.stack
            .len()
    }

    pub fn at(&self, depth: usize) -> Option<&Line<'i>> {
        self.stack
            .get(depth)
    }

    pub fn reset(&mut self) {
        self.stack
            .clear();
    }
}

impl<'i> Default for Ancestry<'i> {
    fn default() -> Ancestry<'i> {
        Ancestry::new()
    }
}

#[cfg(test)]
mod check {
    use super::*;
    use std::borrow::Cow;

    fn line(level: u8, tag: &str) -> Line<'_> {
        Line {
            level,
            tag,
            value: None,
        }
    }

    #[test]
    fn stack_operations() {
        let mut ancestry = Ancestry::new();
        assert_eq!(ancestry.depth(), 0);

        ancestry.descend(&line(0, "INDI"));
        ancestry.descend(&line(1, "BIRT"));
        ancestry.descend(&line(2, "SOUR"));
        ancestry.descend(&line(3, "TEXT"));

        assert_eq!(ancestry.depth(), 4);
        assert_eq!(
            ancestry
                .at(2)
                .map(|l| l.tag),
            Some("SOUR")
        );
        assert_eq!(
            ancestry
                .at(3)
                .map(|l| l.tag),
            Some("TEXT")
        );

        // a sibling at level 1 pops everything deeper
        ancestry.descend(&line(1, "DEAT"));
        assert_eq!(ancestry.depth(), 2);
        assert_eq!(
            ancestry
                .at(1)
                .map(|l| l.tag),
            Some("DEAT")
        );
        assert_eq!(ancestry.at(2), None);

        ancestry.reset();
        assert_eq!(ancestry.depth(), 0);
    }

    #[test]
    fn continuations_keep_their_parents_open() {
        let mut ancestry = Ancestry::new();

        ancestry.descend(&line(0, "INDI"));
        ancestry.descend(&line(1, "BIRT"));
        ancestry.descend(&Line {
            level: 2,
            tag: "SOUR",
            value: Some(Cow::Borrowed("@S1@")),
        });
        ancestry.descend(&line(3, "TEXT"));
        ancestry.descend(&line(4, "CONT"));

        // the TEXT line and its SOUR parent are both still visible
        assert_eq!(
            ancestry
                .at(2)
                .and_then(|l| l.reference()),
            Some("@S1@")
        );
        assert_eq!(
            ancestry
                .at(3)
                .map(|l| l.tag),
            Some("TEXT")
        );
    }
}
