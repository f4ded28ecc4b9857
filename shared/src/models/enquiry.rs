//! Candidate enquiry and follow-up models

use serde::{Deserialize, Serialize};

use crate::row::{RowError, RowReader, SheetRow};

crate::sheet_columns! {
    /// Columns of the candidate enquiry sheet
    pub enum EnquiryColumn [24] {
        Timestamp = 0 => "Timestamp",
        IndentNo = 1 => "Indent No",
        CandidateEnquiryNo = 2 => "Candidate Enquiry No",
        ApplyingForPost = 3 => "Applying For The Post",
        Department = 4 => "Department",
        CandidateName = 5 => "Candidate Name",
        CandidateDob = 6 => "Candidate DOB",
        CandidatePhone = 7 => "Candidate Phone",
        CandidateEmail = 8 => "Candidate Email",
        PreviousCompany = 9 => "Previous Company Name",
        JobExperience = 10 => "Job Experience",
        LastSalary = 11 => "Last Salary Drawn",
        PreviousPosition = 12 => "Previous Position",
        ReasonForLeaving = 13 => "Reason For Leaving",
        MaritalStatus = 14 => "Marital Status",
        LastEmployerMobile = 15 => "Last Employer Mobile",
        CandidatePhoto = 16 => "Candidate Photo",
        ReferenceBy = 17 => "Reference By",
        PresentAddress = 18 => "Present Address",
        AadharNo = 19 => "Aadhar No",
        Resume = 20 => "Candidate Resume",
        PlannedDate = 21 => "Planned",
        ActualDate = 22 => "Actual",
        JoiningDate = 23 => "Joining Date",
    }
}

/// One candidate enquiry row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnquiryCandidate {
    pub timestamp: String,
    pub indent_no: String,
    pub candidate_enquiry_no: String,
    pub applying_for_post: String,
    pub department: String,
    pub candidate_name: String,
    pub candidate_dob: String,
    pub candidate_phone: String,
    pub candidate_email: String,
    pub previous_company: String,
    pub job_experience: String,
    pub last_salary: String,
    pub previous_position: String,
    pub reason_for_leaving: String,
    pub marital_status: String,
    pub last_employer_mobile: String,
    pub candidate_photo_url: String,
    pub reference_by: String,
    pub present_address: String,
    pub aadhar_no: String,
    pub resume_url: String,
    pub planned_date: String,
    pub actual_date: String,
    pub joining_date: String,
}

impl SheetRow for EnquiryCandidate {
    type Column = EnquiryColumn;

    fn read(row: &RowReader<'_, EnquiryColumn>) -> Result<Self, RowError> {
        use EnquiryColumn as C;

        Ok(Self {
            timestamp: row.trimmed(C::Timestamp),
            indent_no: row.trimmed(C::IndentNo),
            candidate_enquiry_no: row.required(C::CandidateEnquiryNo)?,
            applying_for_post: row.get(C::ApplyingForPost),
            department: row.get(C::Department),
            candidate_name: row.trimmed(C::CandidateName),
            candidate_dob: row.trimmed(C::CandidateDob),
            candidate_phone: row.trimmed(C::CandidatePhone),
            candidate_email: row.trimmed(C::CandidateEmail),
            previous_company: row.get(C::PreviousCompany),
            job_experience: row.get(C::JobExperience),
            last_salary: row.get(C::LastSalary),
            previous_position: row.get(C::PreviousPosition),
            reason_for_leaving: row.get(C::ReasonForLeaving),
            marital_status: row.get(C::MaritalStatus),
            last_employer_mobile: row.trimmed(C::LastEmployerMobile),
            candidate_photo_url: row.trimmed(C::CandidatePhoto),
            reference_by: row.get(C::ReferenceBy),
            present_address: row.get(C::PresentAddress),
            aadhar_no: row.trimmed(C::AadharNo),
            resume_url: row.trimmed(C::Resume),
            planned_date: row.trimmed(C::PlannedDate),
            actual_date: row.trimmed(C::ActualDate),
            joining_date: row.trimmed(C::JoiningDate),
        })
    }
}

crate::sheet_columns! {
    /// Columns of the follow-up sheet
    pub enum FollowUpColumn [5] {
        Timestamp = 0 => "Timestamp",
        EnquiryNo = 1 => "Enquiry No",
        Status = 2 => "Status",
        CandidateSays = 3 => "Candidate Says",
        NextDate = 4 => "Next Date",
    }
}

/// Status value that releases a candidate to the joining queue
pub const JOINING_STATUS: &str = "Joining";

/// One follow-up row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUpRecord {
    pub timestamp: String,
    pub enquiry_no: String,
    pub status: String,
    pub candidate_says: String,
    pub next_date: String,
}

impl FollowUpRecord {
    /// Exact, case-sensitive comparison against [`JOINING_STATUS`]
    pub fn is_joining(&self) -> bool {
        self.status == JOINING_STATUS
    }
}

impl SheetRow for FollowUpRecord {
    type Column = FollowUpColumn;

    fn read(row: &RowReader<'_, FollowUpColumn>) -> Result<Self, RowError> {
        Ok(Self {
            timestamp: row.trimmed(FollowUpColumn::Timestamp),
            enquiry_no: row.required(FollowUpColumn::EnquiryNo)?,
            status: row.trimmed(FollowUpColumn::Status),
            candidate_says: row.get(FollowUpColumn::CandidateSays),
            next_date: row.trimmed(FollowUpColumn::NextDate),
        })
    }
}
