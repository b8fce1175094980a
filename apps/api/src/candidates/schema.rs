//! Declarative shape of a Candidate document.
//!
//! Every listed field is required. The validator walks these tables to cast
//! and check incoming JSON before it is deserialized into [`Candidate`].
//!
//! [`Candidate`]: crate::candidates::models::Candidate

#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Text,
    Number,
    /// Whole number that fits an `i32` (academic years).
    Year,
    Date,
    Object(&'static [Field]),
    List(&'static [Field]),
}

impl FieldKind {
    /// Type name used in cast error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Text => "String",
            FieldKind::Number => "Number",
            FieldKind::Year => "Integer",
            FieldKind::Date => "Date",
            FieldKind::Object(_) => "Object",
            FieldKind::List(_) => "Array",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, kind: FieldKind) -> Field {
    Field { name, kind }
}

pub const EMERGENCY_CONTACT: &[Field] = &[
    field("name", FieldKind::Text),
    field("relation", FieldKind::Text),
    field("contactNumber", FieldKind::Text),
];

pub const EDUCATION_ENTRY: &[Field] = &[
    field("qualification", FieldKind::Text),
    field("institution", FieldKind::Text),
    field("fromYear", FieldKind::Year),
    field("toYear", FieldKind::Year),
    field("percentage", FieldKind::Number),
    field("fieldOfStudy", FieldKind::Text),
];

pub const EMPLOYMENT_ENTRY: &[Field] = &[
    field("previousOrganization", FieldKind::Text),
    field("designation", FieldKind::Text),
    field("fromDate", FieldKind::Date),
    field("toDate", FieldKind::Date),
    field("annualCTC", FieldKind::Number),
    field("reasonToLeave", FieldKind::Text),
];

pub const REFERENCE_ENTRY: &[Field] = &[
    field("name", FieldKind::Text),
    field("organization", FieldKind::Text),
    field("designation", FieldKind::Text),
    field("contactNumber", FieldKind::Text),
    field("email", FieldKind::Text),
];

pub const FAMILY_MEMBER: &[Field] = &[
    field("name", FieldKind::Text),
    field("relation", FieldKind::Text),
    field("occupation", FieldKind::Text),
    field("dateOfBirth", FieldKind::Date),
];

pub const BANK_DETAILS: &[Field] = &[
    field("accountHolderName", FieldKind::Text),
    field("bankName", FieldKind::Text),
    field("branchName", FieldKind::Text),
    field("accountNumber", FieldKind::Text),
    field("ifscCode", FieldKind::Text),
    field("providentFundNumber", FieldKind::Text),
    field("uanNumber", FieldKind::Text),
];

pub const CANDIDATE: &[Field] = &[
    field("fullName", FieldKind::Text),
    field("fatherName", FieldKind::Text),
    field("mobileNumber", FieldKind::Text),
    field("gender", FieldKind::Text),
    field("email", FieldKind::Text),
    field("dateOfBirth", FieldKind::Date),
    field("maritalStatus", FieldKind::Text),
    field("panCardNumber", FieldKind::Text),
    field("aadharNumber", FieldKind::Text),
    field("correspondenceAddress", FieldKind::Text),
    field("permanentAddress", FieldKind::Text),
    field("emergencyContact", FieldKind::Object(EMERGENCY_CONTACT)),
    field("educationalInformation", FieldKind::List(EDUCATION_ENTRY)),
    field("employmentDetails", FieldKind::List(EMPLOYMENT_ENTRY)),
    field("references", FieldKind::List(REFERENCE_ENTRY)),
    field("familyDetails", FieldKind::List(FAMILY_MEMBER)),
    field("bankDetails", FieldKind::Object(BANK_DETAILS)),
];
