mod report_dto;
mod submission_dto;

pub use report_dto::ReportViewDto;
pub use submission_dto::{
    is_image_mime_type_allowed, non_blank, parse_form_int, SubmitComplaintDto,
    ALLOWED_IMAGE_MIME_TYPES, MAX_IMAGE_SIZE,
};
