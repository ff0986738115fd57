//! The page the client runs in.
//!
//! [Page] is the in-memory counterpart of the server-rendered document: the
//! transaction and category tables, the forms, the two modals and the toast
//! container. Every patch is existence-checked, so patching something that
//! has already gone is a no-op that reports `false`.

use maud::{DOCTYPE, Markup, html};

use crate::{
    confirm::ConfirmationPrompt,
    format::{format_currency, format_date_str},
    notification::ToastRegion,
    registry::Dataset,
    resource::{ResourceId, ResourceKind},
    validation::{Field, Form, InputType},
};

const TABLE_HEADER_STYLE: &str = "text-xs text-gray-700 uppercase \
    bg-gray-50 dark:bg-gray-700 dark:text-gray-400";

const TABLE_ROW_STYLE: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";

const TABLE_CELL_STYLE: &str = "px-6 py-4";

const BUTTON_DELETE_STYLE: &str = "delete-btn text-red-600 hover:text-red-500 \
    dark:text-red-500 dark:hover:text-red-400 underline bg-transparent \
    border-none cursor-pointer";

const BUTTON_EDIT_STYLE: &str = "edit-category text-blue-600 hover:text-blue-500 \
    dark:text-blue-500 dark:hover:text-blue-400 underline";

const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white bg-gray-50 dark:bg-gray-700 border \
    border-gray-300 dark:border-gray-600";

/// The column of a category row that holds the name.
const CATEGORY_NAME_COLUMN: usize = 1;

/// A table row tied to a backend resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// The resource shown in this row.
    pub id: ResourceId,
    /// The cell text, left to right.
    pub cells: Vec<String>,
    /// Shown in confirmation prompts, from `data-name`.
    pub name: Option<String>,
    /// The transaction date as "YYYY-MM-DD", from `data-date`.
    pub date: Option<String>,
    /// The unformatted amount, from `data-amount`.
    pub amount: Option<String>,
}

impl Row {
    /// A transaction row showing date, time, category, description and amount.
    pub fn transaction(
        id: ResourceId,
        date: &str,
        time: &str,
        category: &str,
        description: &str,
        amount: f64,
    ) -> Self {
        Self {
            id,
            cells: vec![
                format_date_str(date),
                time.to_owned(),
                category.to_owned(),
                description.to_owned(),
                format_currency(amount),
            ],
            name: Some(description.to_owned()),
            date: Some(date.to_owned()),
            amount: Some(amount.to_string()),
        }
    }

    /// A category row showing the ID and name.
    pub fn category(id: ResourceId, name: &str) -> Self {
        Self {
            cells: vec![id.to_string(), name.to_owned()],
            id,
            name: Some(name.to_owned()),
            date: None,
            amount: None,
        }
    }

    /// The data attributes carried by the row's action buttons.
    pub fn dataset(&self) -> Dataset {
        let mut dataset = Dataset::new();
        dataset.insert("id".to_owned(), self.id.to_string());

        for (key, value) in [("name", &self.name), ("date", &self.date), ("amount", &self.amount)]
        {
            if let Some(value) = value {
                dataset.insert(key.to_owned(), value.clone());
            }
        }

        dataset
    }
}

/// A table listing resources of one kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// The kind of resource listed.
    pub kind: ResourceKind,
    /// The column headings.
    pub headers: Vec<String>,
    /// The rows, top to bottom.
    pub rows: Vec<Row>,
}

impl Table {
    /// The transactions table.
    pub fn transactions(rows: Vec<Row>) -> Self {
        Self {
            kind: ResourceKind::Transaction,
            headers: ["Date", "Time", "Category", "Description", "Amount"]
                .map(str::to_owned)
                .to_vec(),
            rows,
        }
    }

    /// The categories table.
    pub fn categories(rows: Vec<Row>) -> Self {
        Self {
            kind: ResourceKind::Category,
            headers: ["ID", "Name"].map(str::to_owned).to_vec(),
            rows,
        }
    }

    /// The row for `id`.
    pub fn row(&self, id: &ResourceId) -> Option<&Row> {
        self.rows.iter().find(|row| &row.id == id)
    }

    /// Remove the row for `id`. Returns `false` if there was no such row.
    pub fn remove_row(&mut self, id: &ResourceId) -> bool {
        let count_before = self.rows.len();
        self.rows.retain(|row| &row.id != id);

        self.rows.len() != count_before
    }

    /// Set the text of cell `column` in the row for `id`.
    ///
    /// Returns `false` if the row or column does not exist.
    pub fn set_cell(&mut self, id: &ResourceId, column: usize, text: &str) -> bool {
        let Some(cell) = self
            .rows
            .iter_mut()
            .find(|row| &row.id == id)
            .and_then(|row| row.cells.get_mut(column))
        else {
            return false;
        };

        *cell = text.to_owned();
        true
    }

    /// Add `row` at the bottom, or replace the row with the same ID.
    ///
    /// Returns `true` if a new row was added.
    pub fn upsert_row(&mut self, row: Row) -> bool {
        match self.rows.iter_mut().find(|existing| existing.id == row.id) {
            Some(existing) => {
                *existing = row;
                false
            }
            None => {
                self.rows.push(row);
                true
            }
        }
    }

    fn render(&self) -> Markup {
        html! {
            table id=(self.kind.table_id()) class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        @for header in &self.headers {
                            th scope="col" class=(TABLE_CELL_STYLE) { (header) }
                        }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                    }
                }

                tbody
                {
                    @for row in &self.rows {
                        (self.render_row(row))
                    }
                }
            }
        }
    }

    fn render_row(&self, row: &Row) -> Markup {
        let delete_action = match self.kind {
            ResourceKind::Transaction => "delete-transaction",
            ResourceKind::Category => "delete-category",
        };

        html! {
            tr class=(TABLE_ROW_STYLE) data-id=(row.id.as_ref())
            {
                @for cell in &row.cells {
                    td class=(TABLE_CELL_STYLE) { (cell) }
                }

                td class=(TABLE_CELL_STYLE)
                {
                    div class="flex gap-4"
                    {
                        @if self.kind == ResourceKind::Category {
                            button
                                type="button"
                                class=(BUTTON_EDIT_STYLE)
                                data-action="edit-category"
                                data-id=(row.id.as_ref())
                                data-name=[row.name.as_deref()]
                            {
                                "Edit"
                            }
                        }

                        button
                            type="button"
                            class=(BUTTON_DELETE_STYLE)
                            data-action=(delete_action)
                            data-id=(row.id.as_ref())
                            data-name=[row.name.as_deref()]
                            data-date=[row.date.as_deref()]
                            data-amount=[row.amount.as_deref()]
                        {
                            "Delete"
                        }
                    }
                }
            }
        }
    }
}

/// The modal for renaming a category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditCategoryModal {
    /// Whether the modal is on screen.
    pub visible: bool,
    /// The value of the `editCategoryId` input.
    pub category_id: String,
    /// The value of the `editCategoryName` input.
    pub category_name: String,
}

impl EditCategoryModal {
    fn render(&self) -> Markup {
        html! {
            div
                id="editCategoryModal"
                class=(if self.visible { "modal" } else { "modal hidden" })
                aria-hidden=(if self.visible { "false" } else { "true" })
            {
                form id="editCategoryForm"
                {
                    input type="hidden" id="editCategoryId" name="categoryId" value=(self.category_id);

                    label for="editCategoryName" { "Category Name" }
                    input
                        type="text"
                        id="editCategoryName"
                        name="categoryName"
                        class=(FORM_TEXT_INPUT_STYLE)
                        value=(self.category_name)
                        required;

                    button type="button" id="saveEditCategory" data-action="save-category" { "Save" }
                    button type="button" data-action="close-category-editor" { "Cancel" }
                }
            }
        }
    }
}

/// The client's view of the document.
#[derive(Debug, Clone, Default)]
pub struct Page {
    /// The transactions table, if the page shows one.
    pub transactions: Option<Table>,
    /// The categories table, if the page shows one.
    pub categories: Option<Table>,
    /// The page's forms.
    pub forms: Vec<Form>,
    /// The edit-category modal, if the page has one.
    pub edit_category_modal: Option<EditCategoryModal>,
    /// The prompt shown in the delete confirmation modal, when it is open.
    pub delete_prompt: Option<ConfirmationPrompt>,
    /// Where the page has navigated to, e.g. a report download.
    pub location: Option<String>,
    /// Whether the page has asked to be reloaded.
    pub reload_requested: bool,
    toast_region: Option<ToastRegion>,
}

impl Page {
    /// An empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a transactions table.
    pub fn with_transactions(mut self, rows: Vec<Row>) -> Self {
        self.transactions = Some(Table::transactions(rows));
        self
    }

    /// Add a categories table.
    pub fn with_categories(mut self, rows: Vec<Row>) -> Self {
        self.categories = Some(Table::categories(rows));
        self
    }

    /// Add a form.
    pub fn with_form(mut self, form: Form) -> Self {
        self.forms.push(form);
        self
    }

    /// Add the edit-category modal, initially hidden.
    pub fn with_category_editor(mut self) -> Self {
        self.edit_category_modal = Some(EditCategoryModal::default());
        self
    }

    /// Add a toast container.
    pub fn with_toast_container(mut self) -> Self {
        self.toast_region = Some(ToastRegion::new());
        self
    }

    /// A handle to the toast container, if the page has one.
    pub fn toast_region(&self) -> Option<ToastRegion> {
        self.toast_region.clone()
    }

    /// The table listing resources of `kind`.
    pub fn table(&self, kind: ResourceKind) -> Option<&Table> {
        match kind {
            ResourceKind::Transaction => self.transactions.as_ref(),
            ResourceKind::Category => self.categories.as_ref(),
        }
    }

    fn table_mut(&mut self, kind: ResourceKind) -> Option<&mut Table> {
        match kind {
            ResourceKind::Transaction => self.transactions.as_mut(),
            ResourceKind::Category => self.categories.as_mut(),
        }
    }

    /// The form with element id `id`.
    pub fn form(&self, id: &str) -> Option<&Form> {
        self.forms.iter().find(|form| form.id == id)
    }

    /// The form with element id `id`, for modification.
    pub fn form_mut(&mut self, id: &str) -> Option<&mut Form> {
        self.forms.iter_mut().find(|form| form.id == id)
    }

    /// Set a field's value. Returns `false` if the form or field is missing.
    pub fn set_field_value(&mut self, form_id: &str, field: &str, value: &str) -> bool {
        self.form_mut(form_id)
            .is_some_and(|form| form.set_value(field, value))
    }

    /// Clear a form. Returns `false` if the form is missing.
    pub fn reset_form(&mut self, form_id: &str) -> bool {
        match self.form_mut(form_id) {
            Some(form) => {
                form.reset();
                true
            }
            None => false,
        }
    }

    /// Remove the row for `id` from the table for `kind`.
    ///
    /// Returns `false` if the table or row is already gone.
    pub fn remove_row(&mut self, kind: ResourceKind, id: &ResourceId) -> bool {
        self.table_mut(kind)
            .is_some_and(|table| table.remove_row(id))
    }

    /// Show `name` in the category row for `id`.
    ///
    /// Returns `false` if the table or row is missing.
    pub fn set_category_name(&mut self, id: &ResourceId, name: &str) -> bool {
        let Some(table) = self.categories.as_mut() else {
            return false;
        };

        let updated = table.set_cell(id, CATEGORY_NAME_COLUMN, name);

        if let Some(row) = table.rows.iter_mut().find(|row| &row.id == id) {
            row.name = Some(name.to_owned());
        }

        updated
    }

    /// Add a category row.
    ///
    /// Returns `false` if the page has no categories table.
    pub fn append_category(&mut self, id: ResourceId, name: &str) -> bool {
        match self.categories.as_mut() {
            Some(table) => {
                table.upsert_row(Row::category(id, name));
                true
            }
            None => false,
        }
    }

    /// Open the edit-category modal with `id` and `name` in its inputs.
    ///
    /// Returns `false` if the page has no such modal.
    pub fn show_category_editor(&mut self, id: &ResourceId, name: &str) -> bool {
        match self.edit_category_modal.as_mut() {
            Some(modal) => {
                modal.category_id = id.to_string();
                modal.category_name = name.to_owned();
                modal.visible = true;
                true
            }
            None => false,
        }
    }

    /// Close the edit-category modal.
    pub fn hide_category_editor(&mut self) {
        if let Some(modal) = self.edit_category_modal.as_mut() {
            modal.visible = false;
        }
    }

    /// Open the delete confirmation modal with `prompt`.
    pub fn show_delete_prompt(&mut self, prompt: ConfirmationPrompt) {
        self.delete_prompt = Some(prompt);
    }

    /// Close the delete confirmation modal if it is asking about `kind`.
    pub fn hide_delete_prompt(&mut self, kind: ResourceKind) {
        if self
            .delete_prompt
            .as_ref()
            .is_some_and(|prompt| prompt.kind == kind)
        {
            self.delete_prompt = None;
        }
    }

    /// Flip the input `input_id` between a password and a text input.
    ///
    /// Returns `false` if no form has such an input.
    pub fn toggle_password_visibility(&mut self, input_id: &str) -> bool {
        let Some(field) = self
            .forms
            .iter_mut()
            .find_map(|form| form.field_mut(input_id))
        else {
            return false;
        };

        field.input_type = match field.input_type {
            InputType::Password => InputType::Text,
            _ => InputType::Password,
        };

        true
    }

    /// Navigate to `url`.
    pub fn navigate(&mut self, url: String) {
        self.location = Some(url);
    }

    /// Ask for the page to be reloaded from the server.
    pub fn request_reload(&mut self) {
        self.reload_requested = true;
    }

    /// Render the document.
    pub fn render(&self) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en"
            {
                head
                {
                    meta charset="UTF-8";
                    title { "Budget Tracker" }
                }

                body
                {
                    main
                    {
                        @for form in &self.forms {
                            (render_form(form))
                        }

                        @if let Some(table) = &self.transactions {
                            (table.render())
                        }

                        @if let Some(table) = &self.categories {
                            (table.render())
                        }
                    }

                    @if let Some(modal) = &self.edit_category_modal {
                        (modal.render())
                    }

                    @if let Some(prompt) = &self.delete_prompt {
                        (render_delete_prompt(prompt))
                    }

                    @if let Some(region) = &self.toast_region {
                        (region.render())
                    }
                }
            }
        }
    }
}

fn render_form(form: &Form) -> Markup {
    html! {
        form id=(form.id) class=[form.was_validated.then_some("was-validated")] novalidate
        {
            @for field in &form.fields {
                (render_field(field))
            }

            button type="submit" { "Submit" }
        }
    }
}

fn render_field(field: &Field) -> Markup {
    let (step, min) = match &field.input_type {
        InputType::Number { step, min } => (step.as_deref(), *min),
        _ => (None, None),
    };

    html! {
        div
        {
            label for=(field.name) { (field.name) }

            @if field.input_type == InputType::Select {
                select id=(field.name) name=(field.name) class=(FORM_TEXT_INPUT_STYLE) required[field.required]
                {
                    option value=(field.value) selected { (field.value) }
                }
            } @else {
                input
                    type=(field.input_type.as_str())
                    id=(field.name)
                    name=(field.name)
                    class=(FORM_TEXT_INPUT_STYLE)
                    value=(field.value)
                    step=[step]
                    min=[min]
                    minlength=[field.min_length]
                    maxlength=[field.max_length]
                    required[field.required];
            }
        }
    }
}

fn render_delete_prompt(prompt: &ConfirmationPrompt) -> Markup {
    html! {
        div id="deleteConfirmModal" class="modal" role="dialog" data-kind=(prompt.kind.as_str())
        {
            h2 { (prompt.title) }
            p { (prompt.message) }

            dl
            {
                @for (label, value) in &prompt.details {
                    dt { (label) }
                    dd { (value) }
                }
            }

            button type="button" data-action="confirm-delete" data-kind=(prompt.kind.as_str()) { "Delete" }
            button type="button" data-action="cancel-delete" data-kind=(prompt.kind.as_str()) { "Cancel" }
        }
    }
}
