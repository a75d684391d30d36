//! Auto-fit text parameters
//!
//! Generated letters are overlaid on a fixed-size letterhead, so the content
//! must fit a fixed vertical budget. This module implements the iterative
//! shrinking strategy as one parameterized algorithm: an ordered list of
//! adjustable axes, each with a floor and a step. An axis is only touched
//! once every axis before it has bottomed out.
//!
//! The in-app preview adjusts font size then line height; the print path
//! additionally adjusts paragraph spacing. Both are expressed as plans over
//! the same loop so the two call sites cannot drift apart.
//!
//! Fitting is best-effort: when every floor is reached and the content still
//! overflows, the result reports `fits == false` and no error is raised.

use log::{debug, warn};

/// Typographic settings adjusted by the fit loop.
///
/// Font size and paragraph spacing are in CSS pixels; line height is a
/// multiplier of the font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitSettings {
    pub font_size: f64,
    pub line_height: f64,
    pub paragraph_spacing: f64,
}

impl Default for FitSettings {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            line_height: 1.6,
            paragraph_spacing: 12.0,
        }
    }
}

impl FitSettings {
    fn get(&self, axis: FitAxis) -> f64 {
        match axis {
            FitAxis::FontSize => self.font_size,
            FitAxis::LineHeight => self.line_height,
            FitAxis::ParagraphSpacing => self.paragraph_spacing,
        }
    }

    fn set(&mut self, axis: FitAxis, value: f64) {
        match axis {
            FitAxis::FontSize => self.font_size = value,
            FitAxis::LineHeight => self.line_height = value,
            FitAxis::ParagraphSpacing => self.paragraph_spacing = value,
        }
    }
}

/// An adjustable dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitAxis {
    FontSize,
    LineHeight,
    ParagraphSpacing,
}

/// One adjustment stage: shrink `axis` by `step` until the content fits or
/// `floor` is reached.
#[derive(Debug, Clone, Copy)]
pub struct FitStep {
    pub axis: FitAxis,
    pub floor: f64,
    pub step: f64,
}

/// Ordered adjustment stages for one fitting pass
#[derive(Debug, Clone)]
pub struct FitPlan {
    steps: Vec<FitStep>,
}

impl FitPlan {
    /// In-app preview: font size then line height
    pub fn preview() -> Self {
        Self {
            steps: vec![
                FitStep { axis: FitAxis::FontSize, floor: 10.0, step: 0.5 },
                FitStep { axis: FitAxis::LineHeight, floor: 1.2, step: 0.05 },
            ],
        }
    }

    /// Print path: font size, line height, then paragraph spacing
    pub fn print() -> Self {
        let mut plan = Self::preview();
        plan.steps.push(FitStep {
            axis: FitAxis::ParagraphSpacing,
            floor: 4.0,
            step: 1.0,
        });
        plan
    }

    pub fn steps(&self) -> &[FitStep] {
        &self.steps
    }
}

/// Outcome of a fitting pass
#[derive(Debug, Clone, Copy)]
pub struct FitResult {
    pub settings: FitSettings,
    /// Measured height at the final settings
    pub height: f64,
    /// Whether the content fits within the budget
    pub fits: bool,
    /// Number of shrink steps applied across all axes
    pub steps_taken: usize,
}

/// Shrink `settings` along the plan's axes until `measure` reports a height
/// within `max_height`, or every axis has reached its floor.
///
/// `measure` is the layout substitute: it renders (or simulates) the content
/// at the given settings and returns the resulting height in pixels. It must
/// be monotone in the settings for the loop to make progress, which holds
/// for any reasonable text layout.
pub fn fit_to_height<F>(
    mut settings: FitSettings,
    plan: &FitPlan,
    max_height: f64,
    mut measure: F,
) -> FitResult
where
    F: FnMut(&FitSettings) -> f64,
{
    // Tolerance against accumulated subtraction error on fractional steps
    const EPS: f64 = 1e-9;

    let mut steps_taken = 0usize;
    let mut height = measure(&settings);

    for stage in plan.steps() {
        while height > max_height && settings.get(stage.axis) > stage.floor + EPS {
            let next = (settings.get(stage.axis) - stage.step).max(stage.floor);
            settings.set(stage.axis, next);
            steps_taken += 1;
            height = measure(&settings);
            debug!(
                "auto-fit: {:?} -> {:.2}, height {:.1}/{:.1}",
                stage.axis, next, height, max_height
            );
        }
        if height <= max_height {
            break;
        }
    }

    let fits = height <= max_height;
    if !fits {
        warn!(
            "auto-fit exhausted all floors, content overflows by {:.1}px",
            height - max_height
        );
    }

    FitResult {
        settings,
        height,
        fits,
        steps_taken,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fitting_content_is_untouched() {
        let result = fit_to_height(FitSettings::default(), &FitPlan::preview(), 500.0, |_| 400.0);
        assert!(result.fits);
        assert_eq!(result.steps_taken, 0);
        assert_eq!(result.settings.font_size, 16.0);
        assert_eq!(result.settings.line_height, 1.6);
    }

    #[test]
    fn test_overflow_terminates_at_floors() {
        let result = fit_to_height(FitSettings::default(), &FitPlan::preview(), 100.0, |_| 1e9);
        assert!(!result.fits);
        assert_eq!(result.settings.font_size, 10.0);
        assert!((result.settings.line_height - 1.2).abs() < 1e-9);
        // Paragraph spacing is not part of the preview plan
        assert_eq!(result.settings.paragraph_spacing, 12.0);
    }

    #[test]
    fn test_print_plan_reaches_spacing_floor() {
        let result = fit_to_height(FitSettings::default(), &FitPlan::print(), 100.0, |_| 1e9);
        assert!(!result.fits);
        assert_eq!(result.settings.font_size, 10.0);
        assert!((result.settings.line_height - 1.2).abs() < 1e-9);
        assert_eq!(result.settings.paragraph_spacing, 4.0);
    }

    #[test]
    fn test_font_size_is_monotone() {
        let mut seen = Vec::new();
        fit_to_height(FitSettings::default(), &FitPlan::print(), 100.0, |s| {
            seen.push(s.font_size);
            1e9
        });
        for pair in seen.windows(2) {
            assert!(pair[1] <= pair[0]);
        }
    }

    #[test]
    fn test_stops_as_soon_as_it_fits() {
        // Height scales with font size only: fits once font_size <= 13.
        let result = fit_to_height(FitSettings::default(), &FitPlan::preview(), 130.0, |s| {
            s.font_size * 10.0
        });
        assert!(result.fits);
        assert_eq!(result.settings.font_size, 13.0);
        assert_eq!(result.settings.line_height, 1.6);
        assert_eq!(result.steps_taken, 6);
    }

    #[test]
    fn test_later_axis_only_after_font_floor() {
        // Never fits while font size is above the floor; the first line-height
        // reduction makes it fit.
        let result = fit_to_height(FitSettings::default(), &FitPlan::preview(), 100.0, |s| {
            if s.font_size > 10.0 || s.line_height > 1.55 {
                200.0
            } else {
                90.0
            }
        });
        assert!(result.fits);
        assert_eq!(result.settings.font_size, 10.0);
        assert!(result.settings.line_height < 1.6);
    }
}
