use validator::ValidationErrors;

use crate::errors::FieldError;

/// Flatten `validator` output into the `[{path, message}]` list returned
/// with a 422 response.
pub fn collect_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields = Vec::new();
    for (field, errs) in errors.field_errors() {
        for err in errs.iter() {
            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{field} is invalid"));
            fields.push(FieldError {
                path: field.to_string(),
                message,
            });
        }
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Form {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
        #[validate(length(max = 3))]
        labels: Vec<String>,
    }

    #[test]
    fn flattens_messages_per_field() {
        let form = Form {
            name: String::new(),
            labels: vec![],
        };
        let errors = form.validate().unwrap_err();
        let fields = collect_field_errors(&errors);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].path, "name");
        assert_eq!(fields[0].message, "Name is required");
    }

    #[test]
    fn falls_back_to_generic_message() {
        let form = Form {
            name: "ok".into(),
            labels: vec!["a".into(), "b".into(), "c".into(), "d".into()],
        };
        let errors = form.validate().unwrap_err();
        let fields = collect_field_errors(&errors);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].path, "labels");
        assert_eq!(fields[0].message, "labels is invalid");
    }

    #[test]
    fn collects_every_failing_field() {
        let form = Form {
            name: String::new(),
            labels: vec!["a".into(), "b".into(), "c".into(), "d".into()],
        };
        let errors = form.validate().unwrap_err();
        let mut paths: Vec<String> = collect_field_errors(&errors)
            .into_iter()
            .map(|f| f.path)
            .collect();
        paths.sort();
        assert_eq!(paths, vec!["labels", "name"]);
    }
}
