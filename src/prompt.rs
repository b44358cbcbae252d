//! Prompt assembly — named, ordered sections concatenated into one
//! completion request.
//!
//! Section order is fixed: system instructions, grounding (only when the
//! turn fetched catalog data), recent history, the user message, and a
//! trailing reinforcement of the grounding rule. Keeping each section a
//! named constant lets tests assert their presence independently.

use crate::grounding::GroundingBlock;
use crate::llm::CompletionRequest;
use crate::session::Turn;

/// Assistant persona and the five hard rules every reply must follow.
pub const SYSTEM_INSTRUCTIONS: &str = "\
Bạn là trợ lý đọc truyện của ứng dụng, trả lời ngắn gọn bằng tiếng Việt.
Quy tắc bắt buộc:
1. Chỉ liệt kê truyện hoặc thể loại có trong phần DỮ LIỆU bên dưới.
2. Trình bày danh sách bằng gạch đầu dòng, mỗi dòng bắt đầu bằng \"- \".
3. Kèm 1-2 câu lý do ngắn cho mỗi mục được nêu.
4. Tuyệt đối không bịa tên truyện hay tên tác giả.
5. Không trả lời chung chung; nếu dữ liệu ghi NO RESULTS thì nói rõ là không tìm thấy.";

/// Closing directive repeating the grounding rule.
pub const REINFORCEMENT: &str =
    "NHẮC LẠI: chỉ trả lời dựa trên dữ liệu được cung cấp ở trên, không thêm truyện nào khác.";

/// Header introducing the grounding section.
const GROUNDING_HEADER: &str = "DỮ LIỆU:";

/// Header introducing the history section.
const HISTORY_HEADER: &str = "LỊCH SỬ HỘI THOẠI:";

/// Compose a completion request from the turn's parts.
///
/// `grounding` is `None` exactly when the intent did not invoke the catalog
/// gateway; no other section is ever omitted.
pub fn build(
    grounding: Option<&GroundingBlock>,
    history: &[&Turn],
    user_message: &str,
) -> CompletionRequest {
    let mut prompt = String::from(SYSTEM_INSTRUCTIONS);
    prompt.push_str("\n\n");

    if let Some(block) = grounding {
        prompt.push_str(GROUNDING_HEADER);
        prompt.push('\n');
        prompt.push_str(&block.text);
        prompt.push_str("\n\n");
    }

    prompt.push_str(HISTORY_HEADER);
    prompt.push('\n');
    if history.is_empty() {
        prompt.push_str("(chưa có)\n");
    } else {
        for turn in history {
            prompt.push_str(&format!("{}: {}\n", turn.role.glyph(), turn.text));
        }
    }
    prompt.push('\n');

    prompt.push_str(&format!("NGƯỜI DÙNG: {user_message}\n\n"));
    prompt.push_str(REINFORCEMENT);

    CompletionRequest::new(prompt)
}
