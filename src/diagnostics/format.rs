/// Fills positional `{}` placeholders in `template`, left to right.
///
/// Surplus placeholders are left in place; surplus values are ignored.
pub fn format_message(template: &str, values: &[&str]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    let mut values = values.iter();
    while let Some(pos) = rest.find("{}") {
        let Some(value) = values.next() else {
            break;
        };
        result.push_str(&rest[..pos]);
        result.push_str(value);
        rest = &rest[pos + 2..];
    }
    result.push_str(rest);
    result
}
