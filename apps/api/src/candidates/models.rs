use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

/// A job-applicant profile as stored in the `candidates` document table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub full_name: String,
    pub father_name: String,
    pub mobile_number: String,
    pub gender: String,
    pub email: String,
    #[serde(serialize_with = "serialize_timestamp")]
    pub date_of_birth: DateTime<Utc>,
    pub marital_status: String,
    pub pan_card_number: String,
    pub aadhar_number: String,
    pub correspondence_address: String,
    pub permanent_address: String,
    pub emergency_contact: EmergencyContact,
    pub educational_information: Vec<EducationEntry>,
    pub employment_details: Vec<EmploymentEntry>,
    pub references: Vec<ReferenceEntry>,
    pub family_details: Vec<FamilyMember>,
    pub bank_details: BankDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    pub name: String,
    pub relation: String,
    pub contact_number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub qualification: String,
    pub institution: String,
    pub from_year: i32,
    pub to_year: i32,
    pub percentage: f64,
    pub field_of_study: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmploymentEntry {
    pub previous_organization: String,
    pub designation: String,
    #[serde(serialize_with = "serialize_timestamp")]
    pub from_date: DateTime<Utc>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub to_date: DateTime<Utc>,
    #[serde(rename = "annualCTC")]
    pub annual_ctc: f64,
    pub reason_to_leave: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceEntry {
    pub name: String,
    pub organization: String,
    pub designation: String,
    pub contact_number: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
    pub name: String,
    pub relation: String,
    pub occupation: String,
    #[serde(serialize_with = "serialize_timestamp")]
    pub date_of_birth: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankDetails {
    pub account_holder_name: String,
    pub bank_name: String,
    pub branch_name: String,
    pub account_number: String,
    pub ifsc_code: String,
    pub provident_fund_number: String,
    pub uan_number: String,
}

/// A persisted candidate: the document plus its generated identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(flatten)]
    pub candidate: Candidate,
}

/// Renders a timestamp as RFC 3339 UTC with millisecond precision,
/// e.g. `1994-06-15T00:00:00.000Z`.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn serialize_timestamp<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_timestamp(ts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::test_support::sample_candidate;
    use serde_json::Value;

    #[test]
    fn test_record_serializes_id_and_camel_case_fields() {
        let record = CandidateRecord {
            id: Uuid::new_v4(),
            candidate: sample_candidate(),
        };
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["_id"], Value::String(record.id.to_string()));
        assert_eq!(json["fullName"], "Asha Verma");
        assert_eq!(json["bankDetails"]["ifscCode"], "HDFC0001234");
        assert!(json["employmentDetails"][0].get("annualCTC").is_some());
        assert!(json.get("full_name").is_none());
    }

    #[test]
    fn test_dates_render_with_milliseconds() {
        let json = serde_json::to_value(sample_candidate()).unwrap();
        assert_eq!(json["dateOfBirth"], "1994-06-15T00:00:00.000Z");
        assert_eq!(
            json["familyDetails"][0]["dateOfBirth"],
            "1962-02-01T00:00:00.000Z"
        );
    }

    #[test]
    fn test_record_reads_back_from_stored_json() {
        let record = CandidateRecord {
            id: Uuid::new_v4(),
            candidate: sample_candidate(),
        };
        let stored = serde_json::to_string(&record).unwrap();
        let parsed: CandidateRecord = serde_json::from_str(&stored).unwrap();
        assert_eq!(parsed, record);
    }
}
