//! Form validation.
//!
//! Validation happens in three layers:
//!
//! 1. Built-in validity ([Form::check_validity]) mirrors the constraints
//!    declared on the inputs: `required`, length limits, number and
//!    date/time syntax.
//! 2. Field refinements ([refine_field]) run whenever a field's value
//!    changes and reject future dates, negative amounts and out-of-range
//!    times.
//! 3. Form rules ([validate_form]) run on submit for the forms that have
//!    cross-field requirements.

use time::{Date, Time, format_description::BorrowedFormatItem, macros::format_description};
use unicode_segmentation::UnicodeSegmentation;

use crate::{format::INPUT_DATE_FORMAT, resource::CATEGORY_ID_LENGTH};

/// The id of the form for recording a transaction.
pub const TRANSACTION_FORM: &str = "transactionForm";
/// The id of the form for creating a category.
pub const ADD_CATEGORY_FORM: &str = "addCategoryForm";
/// The id of the form for setting the monthly budget.
pub const BUDGET_FORM: &str = "budgetForm";

/// The step attribute that marks a number input as a monetary amount.
const AMOUNT_STEP: &str = "0.01";

/// A validation failure the user needs to fix before submitting.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A date after today was entered.
    #[error("Please select a date that is not in the future.")]
    FutureDate,

    /// A negative number was entered into an amount field.
    #[error("Amount cannot be negative.")]
    NegativeAmount,

    /// A time with hour > 23 or minute > 59, or a malformed time, was entered.
    #[error("Please select a valid time.")]
    InvalidTime,

    /// One or more required fields of the form are empty.
    #[error("Please fill in all fields.")]
    MissingFields,

    /// A transaction amount of zero or less was entered.
    #[error("Amount must be greater than 0.")]
    NonPositiveAmount,

    /// The category ID does not have exactly four characters.
    #[error("Category ID must be exactly 4 characters.")]
    InvalidCategoryId,

    /// The budget field is empty.
    #[error("Please enter a budget amount.")]
    MissingBudget,

    /// A budget of zero or less was entered.
    #[error("Budget must be greater than 0.")]
    NonPositiveBudget,
}

/// The type of an input element.
#[derive(Debug, Clone, PartialEq)]
pub enum InputType {
    /// A free text input.
    Text,
    /// A password input, which may be toggled to [InputType::Text] for display.
    Password,
    /// A number input with optional `step` and `min` attributes.
    Number {
        /// The `step` attribute, e.g. "0.01" for monetary amounts.
        step: Option<String>,
        /// The `min` attribute.
        min: Option<f64>,
    },
    /// A date input holding "YYYY-MM-DD".
    Date,
    /// A time input holding "HH:MM".
    Time,
    /// A select element.
    Select,
    /// A hidden input.
    Hidden,
}

impl InputType {
    /// The value of the `type` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Password => "password",
            InputType::Number { .. } => "number",
            InputType::Date => "date",
            InputType::Time => "time",
            InputType::Select => "select",
            InputType::Hidden => "hidden",
        }
    }

    fn is_amount(&self) -> bool {
        matches!(self, InputType::Number { step: Some(step), .. } if step == AMOUNT_STEP)
    }
}

/// A single form control and its current value.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// The field's id and name.
    pub name: String,
    /// The input type.
    pub input_type: InputType,
    /// The current value, empty when the field is blank.
    pub value: String,
    /// Whether the field carries the `required` attribute.
    pub required: bool,
    /// The `minlength` attribute, in characters.
    pub min_length: Option<usize>,
    /// The `maxlength` attribute, in characters.
    pub max_length: Option<usize>,
}

impl Field {
    /// Create an empty, optional field.
    pub fn new(name: &str, input_type: InputType) -> Self {
        Self {
            name: name.to_owned(),
            input_type,
            value: String::new(),
            required: false,
            min_length: None,
            max_length: None,
        }
    }

    /// A text input.
    pub fn text(name: &str) -> Self {
        Self::new(name, InputType::Text)
    }

    /// A password input.
    pub fn password(name: &str) -> Self {
        Self::new(name, InputType::Password)
    }

    /// A monetary amount input (`type="number" step="0.01"`).
    pub fn amount(name: &str) -> Self {
        Self::new(
            name,
            InputType::Number {
                step: Some(AMOUNT_STEP.to_owned()),
                min: None,
            },
        )
    }

    /// A date input.
    pub fn date(name: &str) -> Self {
        Self::new(name, InputType::Date)
    }

    /// A time input.
    pub fn time(name: &str) -> Self {
        Self::new(name, InputType::Time)
    }

    /// A select element.
    pub fn select(name: &str) -> Self {
        Self::new(name, InputType::Select)
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the initial value.
    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_owned();
        self
    }

    /// Set the `minlength` and `maxlength` attributes.
    pub fn with_length(mut self, min_length: usize, max_length: usize) -> Self {
        self.min_length = Some(min_length);
        self.max_length = Some(max_length);
        self
    }

    /// Whether the value satisfies the constraints declared on the input.
    pub fn check_validity(&self) -> bool {
        if self.value.is_empty() {
            return !self.required;
        }

        let length = self.value.graphemes(true).count();

        if self.min_length.is_some_and(|min| length < min)
            || self.max_length.is_some_and(|max| length > max)
        {
            return false;
        }

        match &self.input_type {
            InputType::Number { min, .. } => match self.value.trim().parse::<f64>() {
                Ok(number) => number.is_finite() && min.is_none_or(|min| number >= min),
                Err(_) => false,
            },
            InputType::Date => Date::parse(&self.value, INPUT_DATE_FORMAT).is_ok(),
            InputType::Time => parse_time(&self.value).is_some(),
            _ => true,
        }
    }
}

/// A form and the current values of its controls.
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    /// The form's element id.
    pub id: String,
    /// The form's controls, in document order.
    pub fields: Vec<Field>,
    /// Whether the form has been marked `was-validated`, which turns on the
    /// visual feedback for invalid fields.
    pub was_validated: bool,
}

impl Form {
    /// Create a form.
    pub fn new(id: &str, fields: Vec<Field>) -> Self {
        Self {
            id: id.to_owned(),
            fields,
            was_validated: false,
        }
    }

    /// The form for recording a transaction.
    pub fn transaction() -> Self {
        Self::new(
            TRANSACTION_FORM,
            vec![
                Field::amount("amount").required(),
                Field::date("date").required(),
                Field::time("time").required(),
                Field::select("category").required(),
                Field::text("description").required(),
            ],
        )
    }

    /// The form for creating a category.
    pub fn add_category() -> Self {
        Self::new(
            ADD_CATEGORY_FORM,
            vec![
                Field::text("categoryId")
                    .required()
                    .with_length(CATEGORY_ID_LENGTH, CATEGORY_ID_LENGTH),
                Field::text("categoryName").required(),
            ],
        )
    }

    /// The form for setting the monthly budget.
    pub fn budget() -> Self {
        Self::new(BUDGET_FORM, vec![Field::amount("budget").required()])
    }

    /// Get the field called `name`.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Get the field called `name` for modification.
    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|field| field.name == name)
    }

    /// The value of the field called `name`, or an empty string if the form
    /// has no such field.
    pub fn value(&self, name: &str) -> &str {
        self.field(name)
            .map(|field| field.value.as_str())
            .unwrap_or_default()
    }

    /// Set the value of the field called `name`.
    ///
    /// Returns `false` if the form has no such field.
    pub fn set_value(&mut self, name: &str, value: &str) -> bool {
        match self.field_mut(name) {
            Some(field) => {
                field.value = value.to_owned();
                true
            }
            None => false,
        }
    }

    /// Clear every field and the validation styling.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
        }

        self.was_validated = false;
    }

    /// Whether every field satisfies its declared constraints.
    pub fn check_validity(&self) -> bool {
        self.fields.iter().all(Field::check_validity)
    }

    /// The names of the fields that fail their declared constraints.
    pub fn invalid_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|field| !field.check_validity())
            .map(|field| field.name.as_str())
            .collect()
    }
}

/// Check a field's value after it changes.
///
/// Blank values pass, the required check happens on submit. `today` is the
/// current date in the user's timezone.
///
/// # Errors
///
/// Returns the [ValidationError] describing why the value must be cleared.
pub fn refine_field(field: &Field, today: Date) -> Result<(), ValidationError> {
    if field.value.is_empty() {
        return Ok(());
    }

    match &field.input_type {
        InputType::Date => check_date(&field.value, today),
        InputType::Time => check_time(&field.value),
        input_type if input_type.is_amount() => check_amount(&field.value),
        _ => Ok(()),
    }
}

/// Reject dates strictly after `today`.
///
/// Strings that are not dates are left to [Field::check_validity].
pub fn check_date(value: &str, today: Date) -> Result<(), ValidationError> {
    match Date::parse(value, INPUT_DATE_FORMAT) {
        Ok(date) if date > today => Err(ValidationError::FutureDate),
        _ => Ok(()),
    }
}

/// Reject negative amounts.
pub fn check_amount(value: &str) -> Result<(), ValidationError> {
    match value.trim().parse::<f64>() {
        Ok(amount) if amount < 0.0 => Err(ValidationError::NegativeAmount),
        _ => Ok(()),
    }
}

/// Reject times with hour > 23 or minute > 59, and strings that are not
/// "HH:MM" or "HH:MM:SS" times.
pub fn check_time(value: &str) -> Result<(), ValidationError> {
    match parse_time(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::InvalidTime),
    }
}

const INPUT_TIME_FORMAT: &[BorrowedFormatItem] = format_description!("[hour]:[minute]");

const INPUT_TIME_WITH_SECONDS_FORMAT: &[BorrowedFormatItem] =
    format_description!("[hour]:[minute]:[second]");

fn parse_time(value: &str) -> Option<Time> {
    Time::parse(value, INPUT_TIME_FORMAT)
        .or_else(|_| Time::parse(value, INPUT_TIME_WITH_SECONDS_FORMAT))
        .ok()
}

/// Apply the rules of the form with the given id.
///
/// Forms without extra rules always pass.
///
/// # Errors
///
/// Returns the first rule the form breaks.
pub fn validate_form(form: &Form) -> Result<(), ValidationError> {
    match form.id.as_str() {
        TRANSACTION_FORM => validate_transaction_form(form),
        ADD_CATEGORY_FORM => validate_category_form(form),
        BUDGET_FORM => validate_budget_form(form),
        _ => Ok(()),
    }
}

/// All transaction fields are required and the amount must be positive.
pub fn validate_transaction_form(form: &Form) -> Result<(), ValidationError> {
    let all_filled = ["amount", "date", "time", "category", "description"]
        .iter()
        .all(|name| !form.value(name).is_empty());

    if !all_filled {
        return Err(ValidationError::MissingFields);
    }

    if !is_positive(form.value("amount")) {
        return Err(ValidationError::NonPositiveAmount);
    }

    Ok(())
}

/// Both category fields are required and the ID must have four characters.
pub fn validate_category_form(form: &Form) -> Result<(), ValidationError> {
    let category_id = form.value("categoryId");

    if category_id.is_empty() || form.value("categoryName").is_empty() {
        return Err(ValidationError::MissingFields);
    }

    if category_id.graphemes(true).count() != CATEGORY_ID_LENGTH {
        return Err(ValidationError::InvalidCategoryId);
    }

    Ok(())
}

/// The budget is required and must be positive.
pub fn validate_budget_form(form: &Form) -> Result<(), ValidationError> {
    let budget = form.value("budget");

    if budget.is_empty() {
        return Err(ValidationError::MissingBudget);
    }

    if !is_positive(budget) {
        return Err(ValidationError::NonPositiveBudget);
    }

    Ok(())
}

fn is_positive(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .is_ok_and(|number| number > 0.0)
}

#[cfg(test)]
mod validation_tests {
    use time::macros::date;

    use super::{
        Field, Form, ValidationError, check_amount, check_date, check_time, refine_field,
        validate_budget_form, validate_category_form, validate_form, validate_transaction_form,
    };

    fn filled_transaction_form() -> Form {
        let mut form = Form::transaction();
        form.set_value("amount", "12.50");
        form.set_value("date", "2025-03-01");
        form.set_value("time", "08:30");
        form.set_value("category", "FOOD");
        form.set_value("description", "Lunch");
        form
    }

    #[test]
    fn required_field_must_not_be_empty() {
        let mut form = filled_transaction_form();
        assert!(form.check_validity());

        form.set_value("description", "");

        assert!(!form.check_validity());
        assert_eq!(form.invalid_fields(), vec!["description"]);
    }

    #[test]
    fn optional_empty_field_is_valid() {
        let field = Field::text("notes");

        assert!(field.check_validity());
    }

    #[test]
    fn number_field_must_parse() {
        let field = Field::amount("amount").with_value("twelve");

        assert!(!field.check_validity());
    }

    #[test]
    fn length_limits_count_characters() {
        let field = Field::text("categoryId").with_length(4, 4);

        assert!(!field.clone().with_value("ABC").check_validity());
        assert!(field.clone().with_value("ABCD").check_validity());
        assert!(!field.with_value("ABCDE").check_validity());
    }

    #[test]
    fn future_date_is_rejected() {
        let today = date!(2025 - 06 - 15);

        assert_eq!(
            check_date("2025-06-16", today),
            Err(ValidationError::FutureDate)
        );
        assert_eq!(check_date("2025-06-15", today), Ok(()));
        assert_eq!(check_date("2024-01-01", today), Ok(()));
    }

    #[test]
    fn negative_amount_is_rejected() {
        assert_eq!(check_amount("-0.01"), Err(ValidationError::NegativeAmount));
        assert_eq!(check_amount("0"), Ok(()));
        assert_eq!(check_amount("10.99"), Ok(()));
    }

    #[test]
    fn out_of_range_time_is_rejected() {
        assert_eq!(check_time("24:00"), Err(ValidationError::InvalidTime));
        assert_eq!(check_time("12:60"), Err(ValidationError::InvalidTime));
        assert_eq!(check_time("23:59"), Ok(()));
        assert_eq!(check_time("00:00"), Ok(()));
    }

    #[test]
    fn malformed_time_is_rejected() {
        assert_eq!(check_time("noon"), Err(ValidationError::InvalidTime));
        assert_eq!(check_time("12:30:99:junk"), Err(ValidationError::InvalidTime));
        assert_eq!(check_time("+1:30"), Err(ValidationError::InvalidTime));
        assert_eq!(check_time("12:30:59x"), Err(ValidationError::InvalidTime));
    }

    #[test]
    fn time_with_seconds_is_accepted() {
        assert_eq!(check_time("08:15:30"), Ok(()));
        assert_eq!(check_time("08:15:60"), Err(ValidationError::InvalidTime));
    }

    #[test]
    fn refine_dispatches_on_input_type() {
        let today = date!(2025 - 06 - 15);

        assert_eq!(
            refine_field(&Field::date("date").with_value("2030-01-01"), today),
            Err(ValidationError::FutureDate)
        );
        assert_eq!(
            refine_field(&Field::amount("amount").with_value("-5"), today),
            Err(ValidationError::NegativeAmount)
        );
        assert_eq!(
            refine_field(&Field::time("time").with_value("25:00"), today),
            Err(ValidationError::InvalidTime)
        );
        assert_eq!(
            refine_field(&Field::text("description").with_value("-5"), today),
            Ok(())
        );
        assert_eq!(refine_field(&Field::time("time"), today), Ok(()));
    }

    #[test]
    fn transaction_form_requires_positive_amount() {
        let mut form = filled_transaction_form();
        assert_eq!(validate_transaction_form(&form), Ok(()));

        form.set_value("amount", "0");

        assert_eq!(
            validate_transaction_form(&form),
            Err(ValidationError::NonPositiveAmount)
        );
    }

    #[test]
    fn transaction_form_requires_all_fields() {
        let mut form = filled_transaction_form();
        form.set_value("time", "");

        assert_eq!(
            validate_transaction_form(&form),
            Err(ValidationError::MissingFields)
        );
    }

    #[test]
    fn category_form_requires_four_character_id() {
        let mut form = Form::add_category();
        form.set_value("categoryName", "Groceries");

        form.set_value("categoryId", "ABC");
        assert_eq!(
            validate_category_form(&form),
            Err(ValidationError::InvalidCategoryId)
        );

        form.set_value("categoryId", "ABCD");
        assert_eq!(validate_category_form(&form), Ok(()));
    }

    #[test]
    fn budget_form_rules() {
        let mut form = Form::budget();
        assert_eq!(
            validate_budget_form(&form),
            Err(ValidationError::MissingBudget)
        );

        form.set_value("budget", "-10");
        assert_eq!(
            validate_budget_form(&form),
            Err(ValidationError::NonPositiveBudget)
        );

        form.set_value("budget", "2500");
        assert_eq!(validate_form(&form), Ok(()));
    }

    #[test]
    fn unknown_form_has_no_rules() {
        let form = Form::new("searchForm", vec![]);

        assert_eq!(validate_form(&form), Ok(()));
    }

    #[test]
    fn reset_clears_values_and_styling() {
        let mut form = filled_transaction_form();
        form.was_validated = true;

        form.reset();

        assert!(form.fields.iter().all(|field| field.value.is_empty()));
        assert!(!form.was_validated);
    }
}
