use serde::Serialize;
use crate::core::command::CommandError;

// Outcome kinds shown to users after a form submission
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Status {
    Empty,
    Exists,
    AddError,
    AddSuccess,
    DeleteError,
    DeleteSuccess,
    UpdateError,
    UpdateSuccess,
}

impl Status {
    // arg is the field name for Empty and the book id for delete/update outcomes
    pub fn message(&self, arg: &str) -> String {
        match self {
            Status::Empty => format!(" {} field cannot be empty.", arg),
            Status::Exists => "Book's ISBN and/or Title matches with the existing record.".to_string(),
            Status::AddError => "Error occurred while adding book record.".to_string(),
            Status::AddSuccess => "Book record has been successfully added.".to_string(),
            Status::DeleteError => format!("Error deleting book record with ID: {}", arg),
            Status::DeleteSuccess => format!("Book record with ID: {} has been successfully deleted.", arg),
            Status::UpdateError => format!("Error updating book record with ID: {}", arg),
            Status::UpdateSuccess => format!("Book record with ID: {} has been successfully updated.", arg),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct ResultData {
    pub error: bool,
    pub message: String,
}

impl ResultData {
    pub fn of(error: bool, message: String) -> Self {
        Self { error, message }
    }

    pub fn added<T>(res: &Result<T, CommandError>) -> Self {
        match res {
            Ok(_) => ResultData::of(false, Status::AddSuccess.message("")),
            Err(CommandError::DuplicateKey { .. }) => ResultData::of(true, Status::Exists.message("")),
            Err(err) => invalid_field(err).unwrap_or_else(|| ResultData::of(true, Status::AddError.message(""))),
        }
    }

    pub fn updated<T>(id: &str, res: &Result<T, CommandError>) -> Self {
        match res {
            Ok(_) => ResultData::of(false, Status::UpdateSuccess.message(id)),
            Err(err) => invalid_field(err).unwrap_or_else(|| ResultData::of(true, Status::UpdateError.message(id))),
        }
    }

    pub fn deleted<T>(id: &str, res: &Result<T, CommandError>) -> Self {
        match res {
            Ok(_) => ResultData::of(false, Status::DeleteSuccess.message(id)),
            Err(_) => ResultData::of(true, Status::DeleteError.message(id)),
        }
    }
}

fn invalid_field(err: &CommandError) -> Option<ResultData> {
    match err {
        CommandError::Validation { reason_code: Some(field), .. } => {
            Some(ResultData::of(true, Status::Empty.message(field)))
        }
        CommandError::Validation { message, .. } => Some(ResultData::of(true, message.to_string())),
        _ => None,
    }
}
