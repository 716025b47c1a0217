use serde::Deserialize;

use crate::envelopesim::physicspath::{
    ElectrificationRange,
    PhysicsPath
};


/// Constant grade over `[begin, end]`, in meters per kilometer (positive uphill).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GradeSection {
    begin: f64,
    end: f64,
    grade: f64
}

impl GradeSection {
    pub fn new(begin: f64, end: f64, grade: f64) -> GradeSection {
        GradeSection { begin, end, grade }
    }
}


#[derive(Deserialize)]
struct GradientPathJsonProp {
    length: f64,
    #[serde(default)]
    grades: Vec<GradeSection>,
    #[serde(default)]
    electrification: Vec<ElectrificationRange>
}

impl From<GradientPathJsonProp> for GradientPath {
    fn from(prop: GradientPathJsonProp) -> GradientPath {
        GradientPath::new(prop.length, prop.grades).with_electrification(prop.electrification)
    }
}


/// A path described by grade sections. Positions no section covers are level.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "GradientPathJsonProp")]
pub struct GradientPath {
    length: f64,
    grades: Vec<GradeSection>,
    electrification: Vec<ElectrificationRange>
}

impl GradientPath {
    pub fn new(length: f64, mut grades: Vec<GradeSection>) -> GradientPath {
        grades.sort_by(|lhs, rhs| lhs.begin.total_cmp(&rhs.begin));
        GradientPath { length, grades, electrification: Vec::new() }
    }

    pub fn flat(length: f64) -> GradientPath {
        GradientPath::new(length, Vec::new())
    }

    pub fn with_electrification(mut self, electrification: Vec<ElectrificationRange>) -> GradientPath {
        self.electrification = electrification;
        self
    }

    pub fn grades(&self) -> &[GradeSection] {
        &self.grades
    }

    /// True when sections leave part of `[begin, end]` uncovered.
    fn has_level_gap(&self, begin: f64, end: f64) -> bool {
        let mut covered_to = begin;
        for section in &self.grades {
            if section.end <= covered_to {
                continue;
            }
            if section.begin > covered_to {
                return true;
            }
            covered_to = section.end;
            if covered_to >= end {
                return false;
            }
        }
        covered_to < end
    }
}

impl PhysicsPath for GradientPath {
    fn length(&self) -> f64 {
        self.length
    }

    fn lowest_grade_over(&self, begin: f64, end: f64) -> f64 {
        let (begin, end) = if begin <= end { (begin, end) } else { (end, begin) };
        let lowest = self.grades
            .iter()
            .filter(|section| section.begin <= end && section.end >= begin)
            .map(|section| section.grade)
            .fold(f64::INFINITY, f64::min);
        if lowest == f64::INFINITY || (lowest > 0.0 && self.has_level_gap(begin, end)) {
            lowest.min(0.0)
        } else {
            lowest
        }
    }

    fn electrification_ranges(&self) -> Vec<ElectrificationRange> {
        self.electrification.clone()
    }
}
