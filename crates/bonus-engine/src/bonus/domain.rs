use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier wrapper for employees listed on a bonus sheet.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EmployeeId(pub String);

impl EmployeeId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Departments that carry their own default pillar set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "RL")]
    RestaurantLead,
    #[serde(rename = "Office")]
    Office,
    #[serde(rename = "Finanz/Lohnbuchhaltung")]
    FinancePayroll,
    #[serde(rename = "AL")]
    AreaLead,
}

impl Department {
    pub const fn ordered() -> [Department; 4] {
        [
            Department::RestaurantLead,
            Department::Office,
            Department::FinancePayroll,
            Department::AreaLead,
        ]
    }

    /// Key used in persisted documents and scope keys.
    pub const fn key(self) -> &'static str {
        match self {
            Department::RestaurantLead => "RL",
            Department::Office => "Office",
            Department::FinancePayroll => "Finanz/Lohnbuchhaltung",
            Department::AreaLead => "AL",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        Self::ordered()
            .into_iter()
            .find(|dept| dept.key().eq_ignore_ascii_case(trimmed))
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The three scoring pillars. Closed so a misspelled pillar cannot compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PillarKey {
    Fin,
    Ops,
    Ind,
}

impl PillarKey {
    pub const fn ordered() -> [PillarKey; 3] {
        [PillarKey::Fin, PillarKey::Ops, PillarKey::Ind]
    }

    pub const fn key(self) -> &'static str {
        match self {
            PillarKey::Fin => "fin",
            PillarKey::Ops => "ops",
            PillarKey::Ind => "ind",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PillarKey::Fin => "Finance",
            PillarKey::Ops => "Operations",
            PillarKey::Ind => "Individual",
        }
    }
}

/// A named, weighted line inside a pillar.
///
/// `w` is local to the pillar and is renormalized by the pillar's goal sum.
/// `a` is the achievement ratio supplied upstream; `None` means no figure has
/// been recorded yet and the goal contributes nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub name: String,
    pub w: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Goal {
    pub fn new(name: impl Into<String>, w: f64) -> Self {
        Self {
            name: name.into(),
            w,
            a: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn achieved(name: impl Into<String>, w: f64, a: f64) -> Self {
        Self {
            name: name.into(),
            w,
            a: Some(a),
            extra: BTreeMap::new(),
        }
    }
}

/// One scoring pillar: its share of the total score plus its goal lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pillar {
    pub name: String,
    pub weight: f64,
    pub enabled: bool,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Pillar {
    /// Disabled, zero-weight pillar with no goals.
    pub fn placeholder(key: PillarKey) -> Self {
        Self {
            name: key.label().to_string(),
            weight: 0.0,
            enabled: false,
            goals: Vec::new(),
            extra: BTreeMap::new(),
        }
    }
}

/// Fixed triple keyed by [`PillarKey`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PerPillar<T> {
    pub fin: T,
    pub ops: T,
    pub ind: T,
}

impl<T> PerPillar<T> {
    pub fn new(fin: T, ops: T, ind: T) -> Self {
        Self { fin, ops, ind }
    }

    pub fn from_fn(mut f: impl FnMut(PillarKey) -> T) -> Self {
        Self {
            fin: f(PillarKey::Fin),
            ops: f(PillarKey::Ops),
            ind: f(PillarKey::Ind),
        }
    }

    pub fn get(&self, key: PillarKey) -> &T {
        match key {
            PillarKey::Fin => &self.fin,
            PillarKey::Ops => &self.ops,
            PillarKey::Ind => &self.ind,
        }
    }

    pub fn get_mut(&mut self, key: PillarKey) -> &mut T {
        match key {
            PillarKey::Fin => &mut self.fin,
            PillarKey::Ops => &mut self.ops,
            PillarKey::Ind => &mut self.ind,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (PillarKey, &T)> {
        PillarKey::ordered()
            .into_iter()
            .map(move |key| (key, self.get(key)))
    }

    pub fn map<U>(&self, mut f: impl FnMut(PillarKey, &T) -> U) -> PerPillar<U> {
        PerPillar::from_fn(|key| f(key, self.get(key)))
    }
}

impl PerPillar<f64> {
    pub fn sum(&self) -> f64 {
        self.fin + self.ops + self.ind
    }
}

/// The `{ fin, ops, ind }` pillars owned by one scope (department or employee).
pub type PillarSet = PerPillar<Pillar>;

impl PerPillar<Pillar> {
    /// Set made of three [`Pillar::placeholder`] pillars.
    pub fn placeholder() -> Self {
        Self::from_fn(Pillar::placeholder)
    }

    /// Structurally independent copy of the set.
    ///
    /// Every goal list is rebuilt, so edits to the copy can never reach the
    /// source. Overrides are always installed through this function.
    pub fn deep_clone(&self) -> Self {
        self.map(|_, pillar| Pillar {
            name: pillar.name.clone(),
            weight: pillar.weight,
            enabled: pillar.enabled,
            goals: pillar
                .goals
                .iter()
                .map(|goal| Goal {
                    name: goal.name.clone(),
                    w: goal.w,
                    a: goal.a,
                    extra: goal.extra.clone(),
                })
                .collect(),
            extra: pillar.extra.clone(),
        })
    }
}

/// One default pillar set per department. All four are always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentPillars {
    #[serde(rename = "RL")]
    pub restaurant_lead: PillarSet,
    #[serde(rename = "Office")]
    pub office: PillarSet,
    #[serde(rename = "Finanz/Lohnbuchhaltung")]
    pub finance_payroll: PillarSet,
    #[serde(rename = "AL")]
    pub area_lead: PillarSet,
}

impl DepartmentPillars {
    pub fn from_fn(mut f: impl FnMut(Department) -> PillarSet) -> Self {
        Self {
            restaurant_lead: f(Department::RestaurantLead),
            office: f(Department::Office),
            finance_payroll: f(Department::FinancePayroll),
            area_lead: f(Department::AreaLead),
        }
    }

    pub fn get(&self, dept: Department) -> &PillarSet {
        match dept {
            Department::RestaurantLead => &self.restaurant_lead,
            Department::Office => &self.office,
            Department::FinancePayroll => &self.finance_payroll,
            Department::AreaLead => &self.area_lead,
        }
    }

    pub fn get_mut(&mut self, dept: Department) -> &mut PillarSet {
        match dept {
            Department::RestaurantLead => &mut self.restaurant_lead,
            Department::Office => &mut self.office,
            Department::FinancePayroll => &mut self.finance_payroll,
            Department::AreaLead => &mut self.area_lead,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Department, &PillarSet)> {
        Department::ordered()
            .into_iter()
            .map(move |dept| (dept, self.get(dept)))
    }
}

impl Default for DepartmentPillars {
    fn default() -> Self {
        Self::from_fn(|_| PillarSet::placeholder())
    }
}

/// Sheet-wide payout settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub base_months: f64,
    pub cap_pct: f64,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

pub(crate) const DEFAULT_BASE_MONTHS: f64 = 1.0;
pub(crate) const DEFAULT_CAP_PCT: f64 = 100.0;

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_months: DEFAULT_BASE_MONTHS,
            cap_pct: DEFAULT_CAP_PCT,
            extra: BTreeMap::new(),
        }
    }
}

/// Multiplicative payout adjustments; each is expected to be positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Factors {
    #[serde(default = "neutral_factor")]
    pub tenure: f64,
    #[serde(default = "neutral_factor")]
    pub size: f64,
    #[serde(default = "neutral_factor")]
    pub office: f64,
}

fn neutral_factor() -> f64 {
    1.0
}

impl Factors {
    pub fn product(&self) -> f64 {
        self.tenure * self.size * self.office
    }
}

impl Default for Factors {
    fn default() -> Self {
        Self {
            tenure: 1.0,
            size: 1.0,
            office: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub dept: Department,
    /// Monthly salary.
    pub salary: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_months: Option<f64>,
    #[serde(default)]
    pub factors: Factors,
    /// Record fields the engine does not model (position, cost center, ...).
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Employee {
    pub fn new(id: impl Into<String>, name: impl Into<String>, dept: Department, salary: f64) -> Self {
        Self {
            id: EmployeeId::new(id),
            name: name.into(),
            dept,
            salary,
            base_months: None,
            factors: Factors::default(),
            extra: BTreeMap::new(),
        }
    }

    pub fn base_months_or(&self, settings: &Settings) -> f64 {
        self.base_months.unwrap_or(settings.base_months)
    }
}

/// Root aggregate of one bonus sheet.
///
/// Fields the engine does not model (editor mode, selections, etc.) are kept
/// in `extra` so a save writes back everything a load read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BonusState {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub pillars_by_dept: DepartmentPillars,
    #[serde(default)]
    pub emp_goal_overrides: BTreeMap<EmployeeId, PillarSet>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl BonusState {
    pub fn employee(&self, id: &EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|employee| &employee.id == id)
    }

    pub fn department_pillars(&self, dept: Department) -> &PillarSet {
        self.pillars_by_dept.get(dept)
    }
}
