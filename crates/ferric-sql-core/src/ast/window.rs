//! Window specifications for `OVER` clauses.

use core::fmt;

use super::render::{Commas, Ident};
use super::{Expr, OrderByItem};

/// The unit of a window frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FrameUnits {
    /// ROWS
    Rows,
    /// RANGE
    Range,
    /// GROUPS
    Groups,
}

impl FrameUnits {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rows => "ROWS",
            Self::Range => "RANGE",
            Self::Groups => "GROUPS",
        }
    }
}

/// One end of a window frame.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FrameBound {
    /// CURRENT ROW
    CurrentRow,
    /// UNBOUNDED PRECEDING
    UnboundedPreceding,
    /// UNBOUNDED FOLLOWING
    UnboundedFollowing,
    /// `<expr> PRECEDING`
    Preceding(Box<Expr>),
    /// `<expr> FOLLOWING`
    Following(Box<Expr>),
}

impl fmt::Display for FrameBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CurrentRow => f.write_str("CURRENT ROW"),
            Self::UnboundedPreceding => f.write_str("UNBOUNDED PRECEDING"),
            Self::UnboundedFollowing => f.write_str("UNBOUNDED FOLLOWING"),
            Self::Preceding(expr) => write!(f, "{expr} PRECEDING"),
            Self::Following(expr) => write!(f, "{expr} FOLLOWING"),
        }
    }
}

/// The EXCLUDE option of a window frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FrameExclusion {
    /// EXCLUDE CURRENT ROW
    CurrentRow,
    /// EXCLUDE GROUP
    Group,
    /// EXCLUDE TIES
    Ties,
    /// EXCLUDE NO OTHERS
    NoOthers,
}

impl FrameExclusion {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CurrentRow => "EXCLUDE CURRENT ROW",
            Self::Group => "EXCLUDE GROUP",
            Self::Ties => "EXCLUDE TIES",
            Self::NoOthers => "EXCLUDE NO OTHERS",
        }
    }
}

/// A window frame clause.
///
/// A frame written with a single bound stores that bound as both `start`
/// and `end`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WindowFrame {
    /// ROWS, RANGE or GROUPS.
    pub units: FrameUnits,
    /// Frame start.
    pub start: FrameBound,
    /// Frame end.
    pub end: FrameBound,
    /// Optional EXCLUDE policy.
    pub exclusion: Option<FrameExclusion>,
}

impl fmt::Display for WindowFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.units.as_str())?;
        if self.start == self.end {
            write!(f, " {}", self.start)?;
        } else {
            write!(f, " BETWEEN {} AND {}", self.start, self.end)?;
        }
        if let Some(exclusion) = self.exclusion {
            write!(f, " {}", exclusion.as_str())?;
        }
        Ok(())
    }
}

/// A window specification: a named window, an inline definition, or an
/// inline definition refining a named window.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WindowSpec {
    /// Referenced window name.
    pub name: Option<String>,
    /// PARTITION BY expressions.
    pub partition_by: Vec<Expr>,
    /// ORDER BY items.
    pub order_by: Vec<OrderByItem>,
    /// Frame clause.
    pub frame: Option<WindowFrame>,
}

impl WindowSpec {
    /// A bare reference to a named window.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    fn is_bare_name(&self) -> bool {
        self.name.is_some()
            && self.partition_by.is_empty()
            && self.order_by.is_empty()
            && self.frame.is_none()
    }
}

impl fmt::Display for WindowSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_bare_name() {
            if let Some(name) = &self.name {
                return write!(f, "{}", Ident(name));
            }
        }

        let mut parts: Vec<String> = Vec::new();
        if let Some(name) = &self.name {
            parts.push(Ident(name).to_string());
        }
        if !self.partition_by.is_empty() {
            parts.push(format!("PARTITION BY {}", Commas(&self.partition_by)));
        }
        if !self.order_by.is_empty() {
            parts.push(format!("ORDER BY {}", Commas(&self.order_by)));
        }
        if let Some(frame) = &self.frame {
            parts.push(frame.to_string());
        }
        write!(f, "({})", parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Literal, OrderDirection};

    #[test]
    fn test_single_bound_frame_display() {
        let frame = WindowFrame {
            units: FrameUnits::Rows,
            start: FrameBound::UnboundedPreceding,
            end: FrameBound::UnboundedPreceding,
            exclusion: None,
        };
        assert_eq!(frame.to_string(), "ROWS UNBOUNDED PRECEDING");
    }

    #[test]
    fn test_between_frame_display() {
        let frame = WindowFrame {
            units: FrameUnits::Range,
            start: FrameBound::Preceding(Box::new(Expr::Literal(Literal::integer("3")))),
            end: FrameBound::CurrentRow,
            exclusion: Some(FrameExclusion::Ties),
        };
        assert_eq!(
            frame.to_string(),
            "RANGE BETWEEN 3 PRECEDING AND CURRENT ROW EXCLUDE TIES"
        );
    }

    #[test]
    fn test_named_window_display() {
        assert_eq!(WindowSpec::named("w").to_string(), "w");
    }

    #[test]
    fn test_inline_window_display() {
        let spec = WindowSpec {
            name: None,
            partition_by: vec![Expr::column("dept")],
            order_by: vec![OrderByItem {
                expr: Expr::column("salary"),
                direction: OrderDirection::Desc,
                nulls: None,
            }],
            frame: None,
        };
        assert_eq!(
            spec.to_string(),
            "(PARTITION BY dept ORDER BY salary DESC)"
        );
    }
}
