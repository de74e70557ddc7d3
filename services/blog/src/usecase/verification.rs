use tracing::debug;

use crate::domain::repository::{CodeGenerator, CodeStore, Mailer};
use crate::domain::types::{
    CodeDelivery, CodePurpose, OutgoingMail, VERIFICATION_CODE_LEN, VERIFICATION_CODE_TTL,
};
use crate::error::BlogServiceError;

const VERIFICATION_TEMPLATE: &str = include_str!("../../templates/verification_email.html");
const FORGOT_PASSWORD_TEMPLATE: &str = include_str!("../../templates/forgot_password_email.html");

/// Render the mail carrying `code` for `purpose`.
pub fn compose_code_mail(purpose: CodePurpose, email: &str, code: &str) -> OutgoingMail {
    let (subject, template) = match purpose {
        CodePurpose::Register => ("Verification email", VERIFICATION_TEMPLATE),
        CodePurpose::ForgotPassword => ("Reset your password", FORGOT_PASSWORD_TEMPLATE),
    };
    OutgoingMail {
        to: email.to_owned(),
        subject: subject.to_owned(),
        html_body: template.replace("{{code}}", code),
    }
}

/// Generate a fresh code, store it with a 1 minute TTL, and mail it.
///
/// Runs on the delivery workers, never on the request path.
pub struct DeliverCodeUseCase<C: CodeStore, M: Mailer, G: CodeGenerator> {
    pub codes: C,
    pub mailer: M,
    pub generator: G,
}

impl<C: CodeStore, M: Mailer, G: CodeGenerator> DeliverCodeUseCase<C, M, G> {
    pub async fn execute(&self, job: CodeDelivery) -> Result<(), BlogServiceError> {
        let code = self.generator.generate(VERIFICATION_CODE_LEN);
        self.codes
            .set(
                &job.purpose.code_key(&job.email),
                &code,
                VERIFICATION_CODE_TTL,
            )
            .await?;

        let mail = compose_code_mail(job.purpose, &job.email, &code);
        self.mailer.send(mail).await?;
        debug!(purpose = ?job.purpose, "verification code sent");
        Ok(())
    }
}
