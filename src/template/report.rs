/// Builds the per-user report paragraph templates call as `generate_report`
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailReportGenerator;

impl EmailReportGenerator {
    pub fn generate_report(&self, user_data1: i64, user_data2: i64) -> String {
        format!(
            "A user specific report based on values {} and {}",
            user_data1, user_data2
        )
    }
}
