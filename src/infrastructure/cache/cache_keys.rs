pub fn sheet_rows_key(spreadsheet_id: &str, sheet_name: &str) -> String {
    format!("sheet_rows:{}:{}", spreadsheet_id, sheet_name)
}
