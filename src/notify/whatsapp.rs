use url::form_urlencoded::byte_serialize;

/// `https://wa.me/{number}/?text={message}` with the text percent-encoded
pub fn deep_link(number: &str, text: &str) -> String {
    let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
    let encoded: String = byte_serialize(text.as_bytes()).collect();
    format!("https://wa.me/{}/?text={}", digits, encoded)
}

/// Message an admin sends to a requester to start the conversation
pub fn request_message(project_title: &str, user_name: &str, user_email: &str, user_phone: &str) -> String {
    format!(
        "New project request\nProject: {}\nName: {}\nEmail: {}\nPhone: {}",
        project_title, user_name, user_email, user_phone
    )
}
