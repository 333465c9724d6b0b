use std::sync::LazyLock;

use regex::Regex;

use crate::record::Field;

/// Where a rule looks for its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// The raw post body.
    Text,
    /// The already extracted `salary` value.
    Salary,
}

/// One labeled-field rule: search `source` with `pattern`, keep capture `group`.
#[derive(Debug)]
pub struct Rule {
    pub field: Field,
    pub source: Source,
    pub pattern: &'static str,
    pub group: usize,
}

// Splits "1500€/mês (18000€/ano)" into its monthly and yearly halves.
const SALARY_SPLIT: &str = r"^(\d+,?\d+€?/mês) ?\(?(\d+ ?\d+€?.+)(\)+)";

/// Applied in order; rules sourced from `salary` must come after the salary rule.
pub const RULES: &[Rule] = &[
    Rule { field: Field::Age, source: Source::Text, pattern: r"(Idade ?:) ?(\d{2}).*", group: 2 },
    Rule { field: Field::AcademicLevel, source: Source::Text, pattern: r"(Formação académica:) ?(.*)", group: 2 },
    Rule { field: Field::YearsOfExperience, source: Source::Text, pattern: r"(Experiência profissional ?:) ?(\d{1,2})", group: 2 },
    Rule { field: Field::CivilStatus, source: Source::Text, pattern: r"(Estado civil:) ?(.*)", group: 2 },
    Rule { field: Field::Dependents, source: Source::Text, pattern: r"(Pessoas dependentes/filhos:) ?(\d{1,2})", group: 2 },
    Rule { field: Field::Sector, source: Source::Text, pattern: r"(Sector/Indústria:) (.*)", group: 2 },
    Rule { field: Field::Location, source: Source::Text, pattern: r"(Cidade/Região do Empregador:) ?(.*)", group: 2 },
    // Group 2 holds the "~"/"+" qualifier, which is not kept.
    Rule { field: Field::NumberOfEmployees, source: Source::Text, pattern: r"(Número de trabalhadores:) (~|\+?)(\d+)", group: 3 },
    Rule { field: Field::Multinational, source: Source::Text, pattern: r"(Multinacional\?) ?(Sim|Não)", group: 2 },
    Rule { field: Field::CurrentPosition, source: Source::Text, pattern: r"(Cargo atual:) ?(.*)", group: 2 },
    Rule { field: Field::YearsInTheCompany, source: Source::Text, pattern: r"(Anos na empresa atual:) ?(\d{1,2})", group: 2 },
    Rule { field: Field::HoursOfWork, source: Source::Text, pattern: r"(Horas de trabalho:) ?(\d{1,2})", group: 2 },
    Rule { field: Field::ShiftWork, source: Source::Text, pattern: r"(Trabalho por turnos ou das 9h às 5h \(flexível\?\):) ?(.*)", group: 2 },
    Rule { field: Field::Oncall, source: Source::Text, pattern: r"(Serviço de permanência 24h:) ?(Sim|Não)", group: 2 },
    Rule { field: Field::PersonalTimeOff, source: Source::Text, pattern: r"(Dias de férias/ano:) ?(.*)", group: 2 },
    Rule { field: Field::Salary, source: Source::Text, pattern: r"(Salário bruto/mês \(anual\):) ?(.*)", group: 2 },
    Rule { field: Field::MonthlyGross, source: Source::Salary, pattern: SALARY_SPLIT, group: 1 },
    Rule { field: Field::AnualGross, source: Source::Salary, pattern: SALARY_SPLIT, group: 2 },
];

/// `RULES` with their patterns compiled once.
pub static COMPILED: LazyLock<Vec<(&'static Rule, Regex)>> = LazyLock::new(|| {
    RULES
        .iter()
        .map(|rule| (rule, Regex::new(rule.pattern).unwrap()))
        .collect()
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn all_patterns_compile_with_their_group() {
        for (rule, re) in COMPILED.iter() {
            assert!(
                re.captures_len() > rule.group,
                "{:?} has no group {}",
                rule.field,
                rule.group
            );
        }
    }

    #[test]
    fn one_rule_per_extracted_field() {
        let fields: HashSet<Field> = RULES.iter().map(|r| r.field).collect();
        assert_eq!(fields.len(), RULES.len());
        assert_eq!(RULES.len(), Field::ALL.len() - 2);
        assert!(!fields.contains(&Field::Url));
        assert!(!fields.contains(&Field::Category));
    }

    #[test]
    fn salary_rules_follow_salary() {
        let salary_at = RULES.iter().position(|r| r.field == Field::Salary).unwrap();
        for (i, rule) in RULES.iter().enumerate() {
            if rule.source == Source::Salary {
                assert!(i > salary_at, "{:?} runs before salary", rule.field);
            }
        }
    }
}
