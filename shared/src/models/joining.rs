//! Joining Model
//!
//! The joining sheet stores one employee per row. The row is assembled from
//! the candidate's enquiry, the HR form, and uploaded document links; its
//! column order is relied on by other consumers of the sheet and must not
//! change.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::enquiry::EnquiryCandidate;
use crate::dates;
use crate::error::FormError;
use crate::row::{RowError, RowReader, RowWriter, SheetRow, WriteRow};

crate::sheet_columns! {
    /// Columns of the joining (employee) sheet
    pub enum JoiningColumn [29] {
        Timestamp = 0 => "Timestamp",
        EmployeeId = 1 => "Employee ID",
        IndentNo = 2 => "Indent No",
        EnquiryNo = 3 => "Candidate Enquiry No",
        CandidateName = 4 => "Candidate Name",
        FatherName = 5 => "Father Name",
        DateOfJoining = 6 => "Date Of Joining",
        Designation = 7 => "Designation",
        Department = 8 => "Department",
        DateOfBirth = 9 => "Date Of Birth",
        Gender = 10 => "Gender",
        MobileNo = 11 => "Mobile No",
        FamilyMobileNo = 12 => "Family Mobile No",
        RelationshipWithFamily = 13 => "Relationship With Family",
        Email = 14 => "Email",
        CurrentAddress = 15 => "Current Address",
        AadharNo = 16 => "Aadhar No",
        PanNo = 17 => "PAN No",
        BankAccountNo = 18 => "Bank Account No",
        IfscCode = 19 => "IFSC Code",
        BranchName = 20 => "Branch Name",
        Equipment = 21 => "Equipment",
        AadharCard = 22 => "Aadhar Card",
        PanCard = 23 => "PAN Card",
        CandidatePhoto = 24 => "Candidate Photo",
        BankPassbook = 25 => "Bank Passbook",
        Qualification = 26 => "Qualification Documents",
        PreviousCompany = 27 => "Previous Company",
        Status = 28 => "Status",
    }
}

/// Status written for a freshly joined employee
pub const ACTIVE_STATUS: &str = "Active";

/// Document uploaded with a joining submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoiningDocument {
    AadharCard,
    PanCard,
    CandidatePhoto,
    BankPassbook,
    Qualification,
}

impl JoiningDocument {
    pub const ALL: [Self; 5] = [
        Self::AadharCard,
        Self::PanCard,
        Self::CandidatePhoto,
        Self::BankPassbook,
        Self::Qualification,
    ];

    /// Column holding the uploaded file's link
    pub fn column(self) -> JoiningColumn {
        match self {
            Self::AadharCard => JoiningColumn::AadharCard,
            Self::PanCard => JoiningColumn::PanCard,
            Self::CandidatePhoto => JoiningColumn::CandidatePhoto,
            Self::BankPassbook => JoiningColumn::BankPassbook,
            Self::Qualification => JoiningColumn::Qualification,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AadharCard => "aadhar",
            Self::PanCard => "pan",
            Self::CandidatePhoto => "photo",
            Self::BankPassbook => "passbook",
            Self::Qualification => "qualification",
        }
    }
}

impl fmt::Display for JoiningDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JoiningDocument {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|doc| doc.as_str() == s)
            .ok_or_else(|| format!("unknown document kind '{s}'"))
    }
}

/// Links of uploaded documents; an empty string means none
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentUrls {
    pub aadhar_card: String,
    pub pan_card: String,
    pub candidate_photo: String,
    pub bank_passbook: String,
    pub qualification: String,
}

impl DocumentUrls {
    pub fn set(&mut self, document: JoiningDocument, url: impl Into<String>) {
        let slot = match document {
            JoiningDocument::AadharCard => &mut self.aadhar_card,
            JoiningDocument::PanCard => &mut self.pan_card,
            JoiningDocument::CandidatePhoto => &mut self.candidate_photo,
            JoiningDocument::BankPassbook => &mut self.bank_passbook,
            JoiningDocument::Qualification => &mut self.qualification,
        };
        *slot = url.into();
    }

    pub fn get(&self, document: JoiningDocument) -> &str {
        match document {
            JoiningDocument::AadharCard => &self.aadhar_card,
            JoiningDocument::PanCard => &self.pan_card,
            JoiningDocument::CandidatePhoto => &self.candidate_photo,
            JoiningDocument::BankPassbook => &self.bank_passbook,
            JoiningDocument::Qualification => &self.qualification,
        }
    }
}

/// Fields HR enters when onboarding a candidate
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct JoiningForm {
    #[validate(length(min = 1, message = "father name is required"))]
    pub father_name: String,
    /// Any supported date shape
    #[validate(length(min = 1, message = "date of joining is required"))]
    pub date_of_joining: String,
    #[validate(length(min = 1, message = "gender is required"))]
    pub gender: String,
    pub family_mobile_no: String,
    pub relationship_with_family: String,
    /// Overrides the enquiry's email when set
    #[validate(email(message = "email is not valid"))]
    pub email: Option<String>,
    pub current_address: String,
    #[validate(length(min = 1, message = "Aadhar number is required"))]
    pub aadhar_no: String,
    pub pan_no: String,
    #[validate(length(min = 1, message = "bank account number is required"))]
    pub bank_account_no: String,
    #[validate(length(equal = 11, message = "IFSC code must be 11 characters"))]
    pub ifsc_code: String,
    pub branch_name: String,
    pub equipment: Vec<String>,
}

impl JoiningForm {
    /// Validate the trimmed fields; returns the joining date as `dd/mm/yyyy`.
    ///
    /// A blank email counts as not given.
    pub fn check(&self) -> Result<String, FormError> {
        let trimmed = self.trimmed();
        trimmed.validate()?;
        dates::parse_date(&trimmed.date_of_joining)
            .map(dates::format_display_date)
            .ok_or(FormError::BadDate {
                field: "date_of_joining",
                value: trimmed.date_of_joining,
            })
    }

    fn trimmed(&self) -> Self {
        let trim = |s: &str| s.trim().to_string();
        Self {
            father_name: trim(&self.father_name),
            date_of_joining: trim(&self.date_of_joining),
            gender: trim(&self.gender),
            family_mobile_no: trim(&self.family_mobile_no),
            relationship_with_family: trim(&self.relationship_with_family),
            email: self
                .email
                .as_deref()
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(String::from),
            current_address: trim(&self.current_address),
            aadhar_no: trim(&self.aadhar_no),
            pan_no: trim(&self.pan_no),
            bank_account_no: trim(&self.bank_account_no),
            ifsc_code: trim(&self.ifsc_code),
            branch_name: trim(&self.branch_name),
            equipment: self.equipment.clone(),
        }
    }
}

/// One employee row of the joining sheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoiningRecord {
    pub timestamp: String,
    pub employee_id: String,
    pub indent_no: String,
    pub enquiry_no: String,
    pub candidate_name: String,
    pub father_name: String,
    pub date_of_joining: String,
    pub designation: String,
    pub department: String,
    pub date_of_birth: String,
    pub gender: String,
    pub mobile_no: String,
    pub family_mobile_no: String,
    pub relationship_with_family: String,
    pub email: String,
    pub current_address: String,
    pub aadhar_no: String,
    pub pan_no: String,
    pub bank_account_no: String,
    pub ifsc_code: String,
    pub branch_name: String,
    pub equipment: String,
    pub documents: DocumentUrls,
    pub previous_company: String,
    pub status: String,
}

impl JoiningRecord {
    /// Combine a candidate, the checked form and uploaded links into a row.
    ///
    /// `date_of_joining` is the value returned by [`JoiningForm::check`].
    /// A missing photo upload falls back to the enquiry's photo link and a
    /// blank form address falls back to the enquiry's present address.
    pub fn assemble(
        employee_id: String,
        submitted_at: NaiveDateTime,
        candidate: &EnquiryCandidate,
        form: &JoiningForm,
        date_of_joining: String,
        mut documents: DocumentUrls,
    ) -> Self {
        if documents.candidate_photo.is_empty() {
            documents.candidate_photo = candidate.candidate_photo_url.clone();
        }
        let email = form
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .unwrap_or(candidate.candidate_email.as_str())
            .to_string();
        let current_address = if form.current_address.trim().is_empty() {
            candidate.present_address.clone()
        } else {
            form.current_address.trim().to_string()
        };

        Self {
            timestamp: dates::format_sheet_datetime(submitted_at),
            employee_id,
            indent_no: candidate.indent_no.clone(),
            enquiry_no: candidate.candidate_enquiry_no.clone(),
            candidate_name: candidate.candidate_name.clone(),
            father_name: form.father_name.trim().to_string(),
            date_of_joining,
            designation: candidate.applying_for_post.clone(),
            department: candidate.department.clone(),
            date_of_birth: dates::to_display_date(&candidate.candidate_dob),
            gender: form.gender.trim().to_string(),
            mobile_no: candidate.candidate_phone.clone(),
            family_mobile_no: form.family_mobile_no.trim().to_string(),
            relationship_with_family: form.relationship_with_family.trim().to_string(),
            email,
            current_address,
            aadhar_no: form.aadhar_no.trim().to_string(),
            pan_no: form.pan_no.trim().to_ascii_uppercase(),
            bank_account_no: form.bank_account_no.trim().to_string(),
            ifsc_code: form.ifsc_code.trim().to_ascii_uppercase(),
            branch_name: form.branch_name.trim().to_string(),
            equipment: form
                .equipment
                .iter()
                .map(|e| e.trim())
                .filter(|e| !e.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
            documents,
            previous_company: candidate.previous_company.clone(),
            status: ACTIVE_STATUS.to_string(),
        }
    }
}

impl SheetRow for JoiningRecord {
    type Column = JoiningColumn;

    fn read(row: &RowReader<'_, JoiningColumn>) -> Result<Self, RowError> {
        use JoiningColumn as C;

        Ok(Self {
            timestamp: row.trimmed(C::Timestamp),
            employee_id: row.trimmed(C::EmployeeId),
            indent_no: row.trimmed(C::IndentNo),
            enquiry_no: row.trimmed(C::EnquiryNo),
            candidate_name: row.required(C::CandidateName)?,
            father_name: row.get(C::FatherName),
            date_of_joining: row.trimmed(C::DateOfJoining),
            designation: row.get(C::Designation),
            department: row.get(C::Department),
            date_of_birth: row.trimmed(C::DateOfBirth),
            gender: row.get(C::Gender),
            mobile_no: row.trimmed(C::MobileNo),
            family_mobile_no: row.trimmed(C::FamilyMobileNo),
            relationship_with_family: row.get(C::RelationshipWithFamily),
            email: row.trimmed(C::Email),
            current_address: row.get(C::CurrentAddress),
            aadhar_no: row.trimmed(C::AadharNo),
            pan_no: row.trimmed(C::PanNo),
            bank_account_no: row.trimmed(C::BankAccountNo),
            ifsc_code: row.trimmed(C::IfscCode),
            branch_name: row.get(C::BranchName),
            equipment: row.get(C::Equipment),
            documents: DocumentUrls {
                aadhar_card: row.trimmed(C::AadharCard),
                pan_card: row.trimmed(C::PanCard),
                candidate_photo: row.trimmed(C::CandidatePhoto),
                bank_passbook: row.trimmed(C::BankPassbook),
                qualification: row.trimmed(C::Qualification),
            },
            previous_company: row.get(C::PreviousCompany),
            status: row.trimmed(C::Status),
        })
    }
}

impl WriteRow for JoiningRecord {
    fn write(&self, row: &mut RowWriter<JoiningColumn>) {
        use JoiningColumn as C;

        row.set(C::Timestamp, &self.timestamp)
            .set(C::EmployeeId, &self.employee_id)
            .set(C::IndentNo, &self.indent_no)
            .set(C::EnquiryNo, &self.enquiry_no)
            .set(C::CandidateName, &self.candidate_name)
            .set(C::FatherName, &self.father_name)
            .set(C::DateOfJoining, &self.date_of_joining)
            .set(C::Designation, &self.designation)
            .set(C::Department, &self.department)
            .set(C::DateOfBirth, &self.date_of_birth)
            .set(C::Gender, &self.gender)
            .set(C::MobileNo, &self.mobile_no)
            .set(C::FamilyMobileNo, &self.family_mobile_no)
            .set(C::RelationshipWithFamily, &self.relationship_with_family)
            .set(C::Email, &self.email)
            .set(C::CurrentAddress, &self.current_address)
            .set(C::AadharNo, &self.aadhar_no)
            .set(C::PanNo, &self.pan_no)
            .set(C::BankAccountNo, &self.bank_account_no)
            .set(C::IfscCode, &self.ifsc_code)
            .set(C::BranchName, &self.branch_name)
            .set(C::Equipment, &self.equipment)
            .set(C::PreviousCompany, &self.previous_company)
            .set(C::Status, &self.status);
        for document in JoiningDocument::ALL {
            row.set(document.column(), self.documents.get(document));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::{Column, validate_layout};
    use chrono::NaiveDate;

    fn candidate() -> EnquiryCandidate {
        EnquiryCandidate {
            indent_no: "IND-4".into(),
            candidate_enquiry_no: "ENQ-21".into(),
            applying_for_post: "Accountant".into(),
            department: "Finance".into(),
            candidate_name: "Neha Gupta".into(),
            candidate_dob: "1996-11-23".into(),
            candidate_phone: "9811111111".into(),
            candidate_email: "neha@example.com".into(),
            previous_company: "Acme Traders".into(),
            candidate_photo_url: "https://drive.example/photo".into(),
            present_address: "12 Lake Road".into(),
            actual_date: "2024-01-01".into(),
            ..Default::default()
        }
    }

    fn form() -> JoiningForm {
        JoiningForm {
            father_name: "Suresh Gupta".into(),
            date_of_joining: "2024-02-01".into(),
            gender: "Female".into(),
            aadhar_no: "1234 5678 9012".into(),
            pan_no: "abcde1234f".into(),
            bank_account_no: "001122334455".into(),
            ifsc_code: "sbin0001234".into(),
            equipment: vec!["Laptop".into(), " ".into(), "SIM".into()],
            ..Default::default()
        }
    }

    fn submitted_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 2, 1)
            .unwrap()
            .and_hms_opt(9, 15, 0)
            .unwrap()
    }

    #[test]
    fn test_layout_is_valid() {
        assert_eq!(validate_layout::<JoiningColumn>(), Ok(()));
        assert_eq!(JoiningColumn::ALL.len(), JoiningColumn::WIDTH);
    }

    #[test]
    fn test_form_check() {
        assert_eq!(form().check().unwrap(), "01/02/2024");

        let mut bad_ifsc = form();
        bad_ifsc.ifsc_code = "SBIN".into();
        assert!(matches!(bad_ifsc.check(), Err(FormError::Fields(_))));

        let mut bad_email = form();
        bad_email.email = Some("not-an-email".into());
        assert!(bad_email.check().is_err());

        let mut bad_date = form();
        bad_date.date_of_joining = "soon".into();
        assert!(matches!(bad_date.check(), Err(FormError::BadDate { .. })));
    }

    #[test]
    fn test_blank_required_fields_are_refused() {
        let blanks: [fn(&mut JoiningForm); 4] = [
            |f| f.father_name = "   ".into(),
            |f| f.gender = " ".into(),
            |f| f.aadhar_no = "  ".into(),
            |f| f.bank_account_no = "\t".into(),
        ];
        for blank in blanks {
            let mut form = form();
            blank(&mut form);
            assert!(matches!(form.check(), Err(FormError::Fields(_))));
        }
    }

    #[test]
    fn test_padded_fields_are_trimmed_before_validation() {
        let mut padded = form();
        padded.ifsc_code = " SBIN0001234 ".into();
        padded.date_of_joining = " 2024-02-01 ".into();
        assert_eq!(padded.check().unwrap(), "01/02/2024");

        // Blank email falls back to the enquiry's address
        padded.email = Some("  ".into());
        assert!(padded.check().is_ok());
        let record = JoiningRecord::assemble(
            "EMP-012".into(),
            submitted_at(),
            &candidate(),
            &padded,
            "01/02/2024".into(),
            DocumentUrls::default(),
        );
        assert_eq!(record.email, "neha@example.com");
        assert_eq!(record.ifsc_code, "SBIN0001234");
    }

    #[test]
    fn test_assemble_positions() {
        let mut documents = DocumentUrls::default();
        documents.set(JoiningDocument::AadharCard, "https://drive.example/aadhar");
        let record = JoiningRecord::assemble(
            "EMP-012".into(),
            submitted_at(),
            &candidate(),
            &form(),
            "01/02/2024".into(),
            documents,
        );
        let row = record.to_row();

        assert_eq!(row.len(), 29);
        assert_eq!(row[JoiningColumn::Timestamp.index()], "01/02/24 09:15:00");
        assert_eq!(row[JoiningColumn::EmployeeId.index()], "EMP-012");
        assert_eq!(row[JoiningColumn::EnquiryNo.index()], "ENQ-21");
        assert_eq!(row[JoiningColumn::DateOfBirth.index()], "23/11/1996");
        assert_eq!(row[JoiningColumn::Email.index()], "neha@example.com");
        assert_eq!(row[JoiningColumn::CurrentAddress.index()], "12 Lake Road");
        assert_eq!(row[JoiningColumn::PanNo.index()], "ABCDE1234F");
        assert_eq!(row[JoiningColumn::IfscCode.index()], "SBIN0001234");
        assert_eq!(row[JoiningColumn::Equipment.index()], "Laptop, SIM");
        assert_eq!(row[JoiningColumn::AadharCard.index()], "https://drive.example/aadhar");
        assert_eq!(row[JoiningColumn::PanCard.index()], "");
        assert_eq!(row[JoiningColumn::CandidatePhoto.index()], "https://drive.example/photo");
        assert_eq!(row[JoiningColumn::Status.index()], ACTIVE_STATUS);
    }

    #[test]
    fn test_document_kind_parsing() {
        assert_eq!("Passbook".parse::<JoiningDocument>(), Ok(JoiningDocument::BankPassbook));
        assert!("visa".parse::<JoiningDocument>().is_err());
        for doc in JoiningDocument::ALL {
            assert_eq!(doc.as_str().parse::<JoiningDocument>(), Ok(doc));
        }
    }
}
