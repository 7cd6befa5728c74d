//! Lookup provider seam and the built-in static directory
//!
//! The booking controller only talks to [`ScheduleProvider`]. The static
//! directory answers from in-memory tables; a backend-backed provider can
//! satisfy the same contract without touching the controller.

use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use super::error::DirectoryError;
use super::types::{default_time_slots, Doctor, SpecialtyCode, TimeSlot};

/// Source of doctors and bookable time slots
pub trait ScheduleProvider {
    /// Specialty codes in display order
    fn specialties(&self) -> Vec<SpecialtyCode>;

    /// Doctors practising a specialty. Unknown codes yield an empty list.
    fn doctors_by_specialty(&self, specialty: &SpecialtyCode) -> Vec<Doctor>;

    /// Bookable slots for a doctor on a date
    fn available_slots(&self, doctor_id: &str, date: NaiveDate) -> Vec<TimeSlot>;

    /// Find a doctor by id across all specialties
    fn find_doctor(&self, doctor_id: &str) -> Option<Doctor> {
        self.specialties()
            .iter()
            .flat_map(|code| self.doctors_by_specialty(code))
            .find(|doctor| doctor.id == doctor_id)
    }
}

/// In-memory directory backed by fixed tables
#[derive(Debug, Clone)]
pub struct StaticDirectory {
    specialties: Vec<(SpecialtyCode, Vec<Doctor>)>,
    time_slots: Vec<TimeSlot>,
}

#[derive(Debug, Deserialize)]
struct DirectoryFile {
    #[serde(default)]
    time_slots: Option<Vec<String>>,
    #[serde(default, rename = "specialty")]
    specialties: Vec<SpecialtyEntry>,
}

#[derive(Debug, Deserialize)]
struct SpecialtyEntry {
    code: String,
    #[serde(default)]
    doctors: Vec<DoctorEntry>,
}

#[derive(Debug, Deserialize)]
struct DoctorEntry {
    id: String,
    name: String,
}

impl StaticDirectory {
    /// Directory with no specialties and the default slot sequence
    pub fn empty() -> Self {
        Self {
            specialties: Vec::new(),
            time_slots: default_time_slots(),
        }
    }

    /// The hospital's built-in table
    pub fn builtin() -> Self {
        Self::empty()
            .with_specialty(
                SpecialtyCode::CARDIOLOGY,
                [
                    ("c1", "Dr. John Smith"),
                    ("c2", "Dr. Emily Johnson"),
                    ("c3", "Dr. Michael Chen"),
                ],
            )
            .with_specialty(
                SpecialtyCode::GENERAL,
                [("g1", "Dr. Sarah Williams"), ("g2", "Dr. David Miller")],
            )
            .with_specialty(
                SpecialtyCode::ENT,
                [("e1", "Dr. Robert Davis"), ("e2", "Dr. Lisa Thompson")],
            )
            .with_specialty(
                SpecialtyCode::NEUROLOGY,
                [("n1", "Dr. James Wilson"), ("n2", "Dr. Patricia Brown")],
            )
            .with_specialty(
                SpecialtyCode::ORTHOPEDICS,
                [("o1", "Dr. Thomas Anderson"), ("o2", "Dr. Jennifer Martinez")],
            )
            .with_specialty(
                SpecialtyCode::OPHTHALMOLOGY,
                [("op1", "Dr. Richard Taylor"), ("op2", "Dr. Elizabeth Lee")],
            )
    }

    /// Builder method: append a specialty and its doctors
    pub fn with_specialty<'a>(
        mut self,
        code: &str,
        doctors: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let specialty = SpecialtyCode::new(code);
        let doctors = doctors
            .into_iter()
            .map(|(id, name)| Doctor::new(id, name, specialty.clone()))
            .collect();
        self.specialties.push((specialty, doctors));
        self
    }

    /// Builder method: replace the slot sequence
    pub fn with_time_slots<'a>(mut self, slots: impl IntoIterator<Item = &'a str>) -> Self {
        self.time_slots = slots.into_iter().map(TimeSlot::from).collect();
        self
    }

    /// Parse a directory from TOML
    ///
    /// ```toml
    /// time_slots = ["09:00 AM", "09:30 AM"]
    ///
    /// [[specialty]]
    /// code = "cardiology"
    /// doctors = [{ id = "c1", name = "Dr. John Smith" }]
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, DirectoryError> {
        let file: DirectoryFile = toml::from_str(content)?;

        let mut seen = HashSet::new();
        let mut codes = HashSet::new();
        let mut directory = Self::empty();

        for entry in file.specialties {
            let code = entry.code.trim();
            if code.is_empty() {
                return Err(DirectoryError::EmptyCode);
            }
            if !codes.insert(code.to_string()) {
                return Err(DirectoryError::DuplicateSpecialty(code.to_string()));
            }
            let specialty = SpecialtyCode::new(code);

            let mut doctors = Vec::with_capacity(entry.doctors.len());
            for doctor in entry.doctors {
                if !seen.insert(doctor.id.clone()) {
                    return Err(DirectoryError::DuplicateDoctor(doctor.id));
                }
                doctors.push(Doctor::new(doctor.id, doctor.name, specialty.clone()));
            }
            directory.specialties.push((specialty, doctors));
        }

        if let Some(slots) = file.time_slots {
            if slots.is_empty() {
                return Err(DirectoryError::EmptyTimeSlots);
            }
            directory.time_slots = slots.into_iter().map(TimeSlot::new).collect();
        }

        Ok(directory)
    }

    /// Load a directory file from disk
    pub fn load(path: &Path) -> Result<Self, DirectoryError> {
        let content = std::fs::read_to_string(path).map_err(|e| DirectoryError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let directory = Self::from_toml_str(&content)?;
        tracing::info!(
            path = ?path,
            specialties = directory.specialties.len(),
            "Loaded doctor directory"
        );
        Ok(directory)
    }

    /// Number of doctors across all specialties
    pub fn doctor_count(&self) -> usize {
        self.specialties.iter().map(|(_, doctors)| doctors.len()).sum()
    }
}

impl Default for StaticDirectory {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ScheduleProvider for StaticDirectory {
    fn specialties(&self) -> Vec<SpecialtyCode> {
        self.specialties.iter().map(|(code, _)| code.clone()).collect()
    }

    fn doctors_by_specialty(&self, specialty: &SpecialtyCode) -> Vec<Doctor> {
        self.specialties
            .iter()
            .find(|(code, _)| code == specialty)
            .map(|(_, doctors)| doctors.clone())
            .unwrap_or_default()
    }

    // Slots do not vary by doctor or date; both are accepted so a real
    // backend can plug in behind the same signature.
    fn available_slots(&self, _doctor_id: &str, _date: NaiveDate) -> Vec<TimeSlot> {
        self.time_slots.clone()
    }
}
