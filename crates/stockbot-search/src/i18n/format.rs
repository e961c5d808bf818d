//! Format helpers for strings with interpolation.

/// Results header: the query and how many rows matched.
pub fn results_header(lang: &str, query: &str, count: usize) -> String {
    match lang {
        "Vietnamese" => format!("📦 KẾT QUẢ MÃ: {query}\n📊 Số lượng: {count} kết quả"),
        _ => format!("📦 RESULTS FOR: {query}\n📊 Matches: {count}"),
    }
}

/// Trailing note when some matches were not rendered.
pub fn more_results(lang: &str, hidden: usize) -> String {
    match lang {
        "Vietnamese" => format!("➕ Còn {hidden} kết quả khác chưa hiển thị. Hãy gõ mã cụ thể hơn."),
        _ => format!("➕ {hidden} more results not shown. Try a more specific code."),
    }
}

/// Storage age in days.
pub fn days(lang: &str, n: i64) -> String {
    match lang {
        "Vietnamese" => format!("{n} ngày"),
        _ if n == 1 => "1 day".to_string(),
        _ => format!("{n} days"),
    }
}

/// The "not found" reply, with did-you-mean suggestions when there are any.
pub fn not_found(lang: &str, query: &str, suggestions: &[String]) -> String {
    match lang {
        "Vietnamese" => {
            let hint = if suggestions.is_empty() {
                String::new()
            } else {
                format!(" Gợi ý: {}.", suggestions.join(", "))
            };
            format!("❌ Không tìm thấy mã '{query}'.{hint} Thử mã khác hoặc gõ 'HELP'.")
        }
        _ => {
            let hint = if suggestions.is_empty() {
                String::new()
            } else {
                format!(" Did you mean: {}?", suggestions.join(", "))
            };
            format!("❌ No results for '{query}'.{hint} Try another code or send 'HELP'.")
        }
    }
}

/// Header of the LIST reply.
pub fn code_list_header(lang: &str, count: usize) -> String {
    match lang {
        "Vietnamese" => format!("📋 DANH SÁCH MÃ ({count} mã):"),
        _ => format!("📋 CODE LIST ({count} codes):"),
    }
}

pub fn code_list_footer(lang: &str) -> &'static str {
    match lang {
        "Vietnamese" => "💡 Gõ mã để xem chi tiết",
        _ => "💡 Send a code to see its details",
    }
}

/// Schema mismatch reply naming the missing columns.
pub fn schema_mismatch(lang: &str, missing: &[String]) -> String {
    let cols = missing.join(", ");
    match lang {
        "Vietnamese" => format!("❌ Thiếu các cột: {cols}"),
        _ => format!("❌ The inventory sheet is missing columns: {cols}"),
    }
}

/// Usage text for HELP. Alias tokens come from the rule table.
pub fn help(lang: &str, bot_name: &str, aliases: &[&str]) -> String {
    let alias_line = if aliases.is_empty() {
        String::new()
    } else {
        aliases.join(", ")
    };
    match lang {
        "Vietnamese" => {
            let mut out = format!(
                "🤖 HƯỚNG DẪN SỬ DỤNG {}\n\n\
                 🔍 Tìm kiếm: gõ mã, tên hoặc vị trí (ví dụ: FS, LS)\n\
                 \u{20}  Không phân biệt hoa thường\n",
                bot_name.to_uppercase()
            );
            if !alias_line.is_empty() {
                out.push_str(&format!("\u{20}  Từ khóa nhóm: {alias_line}\n"));
            }
            out.push_str(
                "\n📋 Lệnh khác:\n\
                 \u{20}  HELP: Hiển thị hướng dẫn\n\
                 \u{20}  LIST: Danh sách tất cả mã\n\
                 \u{20}  TEST: Kiểm tra bot",
            );
            out
        }
        _ => {
            let mut out = format!(
                "🤖 {} HELP\n\n\
                 🔍 Search: send a code, product name, or location (e.g. FS, LS)\n\
                 \u{20}  Matching ignores case\n",
                bot_name.to_uppercase()
            );
            if !alias_line.is_empty() {
                out.push_str(&format!("\u{20}  Group keywords: {alias_line}\n"));
            }
            out.push_str(
                "\n📋 Commands:\n\
                 \u{20}  HELP: show this message\n\
                 \u{20}  LIST: list every code\n\
                 \u{20}  TEST: check the bot is alive",
            );
            out
        }
    }
}
