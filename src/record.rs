use serde::Serialize;

/// Every column of a parsed post, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Url,
    Category,
    Age,
    AcademicLevel,
    YearsOfExperience,
    CivilStatus,
    Dependents,
    Sector,
    Location,
    NumberOfEmployees,
    Multinational,
    CurrentPosition,
    YearsInTheCompany,
    HoursOfWork,
    ShiftWork,
    Oncall,
    PersonalTimeOff,
    Salary,
    MonthlyGross,
    AnualGross,
}

impl Field {
    pub const ALL: [Field; 20] = [
        Field::Url,
        Field::Category,
        Field::Age,
        Field::AcademicLevel,
        Field::YearsOfExperience,
        Field::CivilStatus,
        Field::Dependents,
        Field::Sector,
        Field::Location,
        Field::NumberOfEmployees,
        Field::Multinational,
        Field::CurrentPosition,
        Field::YearsInTheCompany,
        Field::HoursOfWork,
        Field::ShiftWork,
        Field::Oncall,
        Field::PersonalTimeOff,
        Field::Salary,
        Field::MonthlyGross,
        Field::AnualGross,
    ];

    /// Column name used in the CSV header and JSON output.
    pub fn name(self) -> &'static str {
        match self {
            Field::Url => "url",
            Field::Category => "category",
            Field::Age => "age",
            Field::AcademicLevel => "academic_level",
            Field::YearsOfExperience => "years_of_experience",
            Field::CivilStatus => "civil_status",
            Field::Dependents => "dependents",
            Field::Sector => "sector",
            Field::Location => "location",
            Field::NumberOfEmployees => "number_of_employees",
            Field::Multinational => "multinational",
            Field::CurrentPosition => "current_position",
            Field::YearsInTheCompany => "years_in_the_company",
            Field::HoursOfWork => "hours_of_work",
            Field::ShiftWork => "shift_work",
            Field::Oncall => "oncall",
            Field::PersonalTimeOff => "personal_time_off",
            Field::Salary => "salary",
            Field::MonthlyGross => "monthly_gross",
            Field::AnualGross => "anual_gross",
        }
    }
}

/// One parsed post. Extracted values are cleaned, non-empty strings or `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Record {
    pub url: String,
    pub category: Option<String>,
    pub age: Option<String>,
    pub academic_level: Option<String>,
    pub years_of_experience: Option<String>,
    pub civil_status: Option<String>,
    pub dependents: Option<String>,
    pub sector: Option<String>,
    pub location: Option<String>,
    pub number_of_employees: Option<String>,
    pub multinational: Option<String>,
    pub current_position: Option<String>,
    pub years_in_the_company: Option<String>,
    pub hours_of_work: Option<String>,
    pub shift_work: Option<String>,
    pub oncall: Option<String>,
    pub personal_time_off: Option<String>,
    pub salary: Option<String>,
    pub monthly_gross: Option<String>,
    pub anual_gross: Option<String>,
}

impl Record {
    pub fn new(url: &str, category: Option<&str>) -> Self {
        Self {
            url: url.to_string(),
            category: category.map(str::to_string),
            ..Default::default()
        }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Url => Some(self.url.as_str()),
            _ => self.slot(field).and_then(|v| v.as_deref()),
        }
    }

    /// Only the extractor fills records; `url` is fixed at construction.
    pub(crate) fn set(&mut self, field: Field, value: Option<String>) {
        if let Some(slot) = self.slot_mut(field) {
            *slot = value;
        }
    }

    /// Fraction of fields populated, counting all 20 columns (url and category too).
    pub fn confidence(&self) -> f64 {
        let total = Field::ALL.len();
        let absent = Field::ALL
            .iter()
            .filter(|&&f| self.get(f).is_none())
            .count();
        1.0 - absent as f64 / total as f64
    }

    /// Reads a "Sim"/"Não" answer as a boolean. Stored values stay as text.
    pub fn flag(&self, field: Field) -> Option<bool> {
        match self.get(field)? {
            "Sim" => Some(true),
            "Não" => Some(false),
            _ => None,
        }
    }

    /// Values in `Field::ALL` order, absent fields as empty cells.
    pub fn row(&self) -> Vec<&str> {
        Field::ALL
            .iter()
            .map(|&f| self.get(f).unwrap_or(""))
            .collect()
    }

    fn slot(&self, field: Field) -> Option<&Option<String>> {
        let slot = match field {
            Field::Url => return None,
            Field::Category => &self.category,
            Field::Age => &self.age,
            Field::AcademicLevel => &self.academic_level,
            Field::YearsOfExperience => &self.years_of_experience,
            Field::CivilStatus => &self.civil_status,
            Field::Dependents => &self.dependents,
            Field::Sector => &self.sector,
            Field::Location => &self.location,
            Field::NumberOfEmployees => &self.number_of_employees,
            Field::Multinational => &self.multinational,
            Field::CurrentPosition => &self.current_position,
            Field::YearsInTheCompany => &self.years_in_the_company,
            Field::HoursOfWork => &self.hours_of_work,
            Field::ShiftWork => &self.shift_work,
            Field::Oncall => &self.oncall,
            Field::PersonalTimeOff => &self.personal_time_off,
            Field::Salary => &self.salary,
            Field::MonthlyGross => &self.monthly_gross,
            Field::AnualGross => &self.anual_gross,
        };
        Some(slot)
    }

    fn slot_mut(&mut self, field: Field) -> Option<&mut Option<String>> {
        let slot = match field {
            Field::Url => return None,
            Field::Category => &mut self.category,
            Field::Age => &mut self.age,
            Field::AcademicLevel => &mut self.academic_level,
            Field::YearsOfExperience => &mut self.years_of_experience,
            Field::CivilStatus => &mut self.civil_status,
            Field::Dependents => &mut self.dependents,
            Field::Sector => &mut self.sector,
            Field::Location => &mut self.location,
            Field::NumberOfEmployees => &mut self.number_of_employees,
            Field::Multinational => &mut self.multinational,
            Field::CurrentPosition => &mut self.current_position,
            Field::YearsInTheCompany => &mut self.years_in_the_company,
            Field::HoursOfWork => &mut self.hours_of_work,
            Field::ShiftWork => &mut self.shift_work,
            Field::Oncall => &mut self.oncall,
            Field::PersonalTimeOff => &mut self.personal_time_off,
            Field::Salary => &mut self.salary,
            Field::MonthlyGross => &mut self.monthly_gross,
            Field::AnualGross => &mut self.anual_gross,
        };
        Some(slot)
    }
}
