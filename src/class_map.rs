use std::borrow::Cow;

use crate::error::Error;

pub const COCO_CLASSES: [&str; 80] = [
    "person", "bicycle", "car", "motorcycle", "airplane", "bus", "train", "truck", "boat",
    "traffic light", "fire hydrant", "stop sign", "parking meter", "bench", "bird", "cat", "dog",
    "horse", "sheep", "cow", "elephant", "bear", "zebra", "giraffe", "backpack", "umbrella",
    "handbag", "tie", "suitcase", "frisbee", "skis", "snowboard", "sports ball", "kite",
    "baseball bat", "baseball glove", "skateboard", "surfboard", "tennis racket", "bottle",
    "wine glass", "cup", "fork", "knife", "spoon", "bowl", "banana", "apple", "sandwich", "orange",
    "broccoli", "carrot", "hot dog", "pizza", "donut", "cake", "chair", "couch", "potted plant",
    "bed", "dining table", "toilet", "tv", "laptop", "mouse", "remote", "keyboard", "cell phone",
    "microwave", "oven", "toaster", "sink", "refrigerator", "book", "clock", "vase", "scissors",
    "teddy bear", "hair drier", "toothbrush",
];

/// COCO index of "apple"
pub const APPLE: u32 = 47;

/// Resolves detector class indices to labels and applies the class filter
#[derive(Debug, Clone)]
pub struct ClassMap {
    names: Vec<Cow<'static, str>>,
    classes: Vec<u32>,
}

impl ClassMap {
    pub fn new(names: Vec<String>, classes: Vec<u32>) -> Self {
        Self {
            names: names.into_iter().map(Cow::Owned).collect(),
            classes,
        }
    }

    pub fn coco(classes: Vec<u32>) -> Self {
        Self {
            names: COCO_CLASSES.iter().map(|&n| Cow::Borrowed(n)).collect(),
            classes,
        }
    }

    #[inline]
    pub fn name(&self, idx: u32) -> Result<&str, Error> {
        self.names
            .get(idx as usize)
            .map(|n| n.as_ref())
            .ok_or(Error::UnknownClass(idx))
    }

    /// An empty filter lets every class through
    #[inline]
    pub fn allows(&self, idx: u32) -> bool {
        self.classes.is_empty() || self.classes.contains(&idx)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for ClassMap {
    fn default() -> Self {
        Self::coco(vec![APPLE])
    }
}
