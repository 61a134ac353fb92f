mod financial_actions_test;
mod job_test;
