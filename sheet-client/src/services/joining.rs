//! Joining workflow
//!
//! Candidates released by a follow-up are onboarded by appending an employee
//! row to the joining sheet and then stamping the joining date on their
//! enquiry. The two writes are independent requests: if the second fails the
//! employee row stays and the caller gets [`ClientError::PartialWrite`].

use serde::Serialize;
use shared::models::{
    DocumentUrls, EnquiryCandidate, EnquiryColumn, FollowUpRecord, JoiningDocument, JoiningForm,
    JoiningRecord,
};
use shared::row::{Column, SheetEntry, WriteRow};
use shared::rules::ready_to_join;
use shared::util::next_prefixed_id;
use validator::Validate;

use crate::audit::audit_log;
use crate::context::SheetContext;
use crate::share::EmailShare;
use crate::upload::{FileUpload, upload_all};
use crate::{ClientError, ClientResult};

/// Result of a completed joining submission
#[derive(Debug, Clone, Serialize)]
pub struct JoiningOutcome {
    pub employee_id: String,
    pub record: JoiningRecord,
    /// Enquiry row whose joining date was written
    pub enquiry_row: usize,
}

/// HR view over the joining queue
#[derive(Debug, Clone)]
pub struct JoiningDesk {
    ctx: SheetContext,
}

impl JoiningDesk {
    pub fn new(ctx: SheetContext) -> Self {
        Self { ctx }
    }

    /// Candidates ready to be onboarded
    pub async fn queue(&self) -> ClientResult<Vec<SheetEntry<EnquiryCandidate>>> {
        let sheets = &self.ctx.config.sheets;
        let (enquiries, follow_ups) = tokio::try_join!(
            self.ctx.load::<EnquiryCandidate>(&sheets.enquiry),
            self.ctx.load::<FollowUpRecord>(&sheets.follow_up),
        )?;
        Ok(ready_to_join(&enquiries, &follow_ups))
    }

    /// Onboard the candidate behind `enquiry_no`.
    pub async fn submit(
        &self,
        enquiry_no: &str,
        form: &JoiningForm,
        documents: Vec<(JoiningDocument, FileUpload)>,
    ) -> ClientResult<JoiningOutcome> {
        let date_of_joining = form.check()?;
        let config = &self.ctx.config;
        let enquiry_no = enquiry_no.trim();

        let (queue, employees) = tokio::try_join!(
            self.queue(),
            self.ctx.load::<JoiningRecord>(&config.sheets.joining),
        )?;
        let candidate = queue
            .into_iter()
            .find(|e| e.record.candidate_enquiry_no == enquiry_no)
            .ok_or_else(|| {
                ClientError::NotFound(format!("enquiry '{enquiry_no}' in the joining queue"))
            })?;

        let employee_id = next_prefixed_id(
            &config.employee_id_prefix,
            employees.iter().map(|e| e.record.employee_id.as_str()),
        );

        let files = documents
            .into_iter()
            .map(|(doc, file)| (doc, file.renamed(&format!("{employee_id}_{doc}"))))
            .collect();
        let links = upload_all(
            self.ctx.api.as_ref(),
            files,
            &config.upload_folder_id,
            config.upload_failure_policy,
        )
        .await?;
        let mut urls = DocumentUrls::default();
        for (doc, url) in links {
            urls.set(doc, url);
        }

        let record = JoiningRecord::assemble(
            employee_id.clone(),
            self.ctx.clock.now(),
            &candidate.record,
            form,
            date_of_joining.clone(),
            urls,
        );
        self.ctx
            .api
            .insert(&config.sheets.joining.name, &record.to_row())
            .await?;
        tracing::info!(%employee_id, enquiry_no, "Employee row added");

        self.ctx
            .api
            .update_cell(
                &config.sheets.enquiry.name,
                candidate.row_number,
                EnquiryColumn::JoiningDate.number(),
                &date_of_joining,
            )
            .await
            .map_err(|e| {
                tracing::error!(%employee_id, enquiry_no, error = %e, "Joining date not written");
                ClientError::PartialWrite {
                    completed: format!(
                        "employee {employee_id} added to '{}'",
                        config.sheets.joining.name
                    ),
                    message: format!("joining date for enquiry {enquiry_no} not written: {e}"),
                }
            })?;

        audit_log!(config.operator, "joining.submit", enquiry_no, employee_id);
        Ok(JoiningOutcome {
            employee_id,
            record,
            enquiry_row: candidate.row_number,
        })
    }

    /// Email a share request after validating it
    pub async fn share_documents(&self, share: &EmailShare) -> ClientResult<()> {
        share
            .validate()
            .map_err(|e| ClientError::Validation(e.to_string()))?;
        self.ctx.api.share_via_email(share).await?;
        tracing::info!(recipient = %share.recipient_email, documents = share.documents.len(), "Documents shared");
        audit_log!(
            self.ctx.config.operator,
            "documents.share",
            share.recipient_email,
            share.documents.len()
        );
        Ok(())
    }

    /// Email the uploaded documents of an existing employee
    pub async fn share_employee_documents(
        &self,
        employee_id: &str,
        recipient_email: &str,
        message: &str,
    ) -> ClientResult<EmailShare> {
        let employee_id = employee_id.trim();
        let employee = self
            .ctx
            .load::<JoiningRecord>(&self.ctx.config.sheets.joining)
            .await?
            .into_iter()
            .map(|e| e.record)
            .find(|r| r.employee_id == employee_id)
            .ok_or_else(|| ClientError::NotFound(format!("employee '{employee_id}'")))?;

        let share = JoiningDocument::ALL.into_iter().fold(
            EmailShare::new(
                recipient_email,
                format!("Documents of {} ({employee_id})", employee.candidate_name),
            )
            .with_message(message),
            |share, doc| {
                share.with_document(doc.column().header(), employee.documents.get(doc))
            },
        );
        self.share_documents(&share).await?;
        Ok(share)
    }
}
